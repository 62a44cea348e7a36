//! Lenient date parsing for the `date` column.

use crate::utils::config::DATE_FORMATS;
use chrono::NaiveDate;

/// Parse a funding date.
///
/// Accepts the layouts in `DATE_FORMATS`, optionally followed by a time
/// part separated by a space or `T`. The time part is discarded.
///
/// # Returns
/// `None` for anything that does not parse; callers treat that as an
/// unknown date.
pub fn parse_event_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let date_part = raw
        .split(|c: char| c == ' ' || c == 'T')
        .next()
        .unwrap_or(raw);

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}
