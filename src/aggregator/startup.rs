//! Per-startup profile.

use super::grouping::{build_table, sort_newest_first};
use crate::parser::{Column, Dataset, EntityReport, FundingEvent, StartupProfile};
use crate::utils::config::NOT_AVAILABLE;
use crate::utils::error::ReportError;
use log::{debug, warn};

/// Columns the startup profile cannot run without
pub const STARTUP_COLUMNS: &[Column] = &[Column::Startup, Column::Amount];

/// Columns shown in the funding history, when present
pub const HISTORY_COLUMNS: &[Column] = &[Column::Date, Column::Round, Column::Amount, Column::Investors];

/// Build the profile of one startup
///
/// **Public** - main entry point for the startup report
///
/// # Arguments
/// * `dataset` - Full dataset snapshot
/// * `startup` - Exact, case-sensitive startup name
///
/// # Returns
/// `EntityReport::NoDataForEntity` when no event carries that name
///
/// # Errors
/// * `ReportError::MissingColumn` - `startup` or `amount` absent
pub fn startup_profile(
    dataset: &Dataset,
    startup: &str,
) -> Result<EntityReport<StartupProfile>, ReportError> {
    dataset.require(STARTUP_COLUMNS)?;

    let mut events: Vec<&FundingEvent> = dataset
        .events()
        .iter()
        .filter(|e| e.startup == startup)
        .collect();

    if events.is_empty() {
        warn!("No data found for startup: {}", startup);
        return Ok(EntityReport::NoDataForEntity {
            name: startup.to_string(),
        });
    }

    debug!("Startup '{}' has {} funding events", startup, events.len());

    let total_funding: f64 = events.iter().map(|e| e.amount_or_zero()).sum();
    let funding_rounds_count = events.len();

    // Source order, before the history is re-sorted
    let primary_vertical = events
        .iter()
        .find_map(|e| e.vertical.clone())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    sort_newest_first(&mut events);
    let funding_history = build_table("funding_history", dataset, HISTORY_COLUMNS, &events);

    Ok(EntityReport::Found(StartupProfile {
        startup: startup.to_string(),
        total_funding,
        funding_rounds_count,
        primary_vertical,
        funding_history,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{CellValue, LoadStats};
    use chrono::NaiveDate;
    use std::collections::BTreeSet;

    #[test]
    fn test_primary_vertical_first_known() {
        let dataset = Dataset::from_events(vec![
            FundingEvent::new("A", Some(1.0), None),
            FundingEvent::new("A", Some(2.0), None).with_vertical("FinTech"),
            FundingEvent::new("A", Some(3.0), None).with_vertical("EdTech"),
        ]);

        let report = startup_profile(&dataset, "A").unwrap();
        assert_eq!(report.found().unwrap().primary_vertical, "FinTech");
    }

    #[test]
    fn test_primary_vertical_not_available() {
        let dataset = Dataset::from_events(vec![FundingEvent::new("A", Some(1.0), None)]);
        let report = startup_profile(&dataset, "A").unwrap();
        assert_eq!(report.found().unwrap().primary_vertical, NOT_AVAILABLE);
    }

    #[test]
    fn test_history_limited_to_present_columns() {
        let columns: BTreeSet<Column> = [Column::Startup, Column::Amount, Column::Date]
            .into_iter()
            .collect();
        let events = vec![
            FundingEvent::new("A", Some(1.0), NaiveDate::from_ymd_opt(2019, 5, 1)),
            FundingEvent::new("A", Some(2.0), NaiveDate::from_ymd_opt(2021, 5, 1)),
        ];
        let dataset = Dataset::new(events, columns, LoadStats::default());

        let report = startup_profile(&dataset, "A").unwrap();
        let history = &report.found().unwrap().funding_history;

        assert_eq!(history.columns, vec![Column::Date, Column::Amount]);
        assert_eq!(history.cell(0, Column::Amount), Some(&CellValue::Number(2.0)));
        assert_eq!(history.cell(1, Column::Amount), Some(&CellValue::Number(1.0)));
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let dataset = Dataset::from_events(vec![FundingEvent::new("Ola", Some(1.0), None)]);
        let report = startup_profile(&dataset, "ola").unwrap();
        assert!(!report.is_found());
    }
}
