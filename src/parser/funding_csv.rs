//! CSV loader for funding datasets.
//!
//! Turns a startup-funding CSV into a `Dataset`:
//! - Headers are resolved case-insensitively; unknown columns are ignored
//! - Missing known columns are recorded, not rejected (reports check them)
//! - Bad dates and amounts become unknown values and are counted

use super::dates::parse_event_date;
use super::event::{Column, Dataset, FundingEvent, LoadStats};
use crate::utils::config::NULL_LITERALS;
use crate::utils::error::LoadError;
use csv::StringRecord;
use log::{debug, info, warn};
use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Load a funding dataset from a CSV file
///
/// **Public** - main entry point for file-backed datasets
///
/// # Errors
/// * `LoadError::Io` - file cannot be opened
/// * `LoadError::Csv` - malformed CSV
/// * `LoadError::MissingHeader` - the file has no header row
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset, LoadError> {
    let path = path.as_ref();
    info!("Loading funding data from: {}", path.display());

    let file = File::open(path)?;
    let dataset = load_dataset_from_reader(file)?;

    info!("Data loaded successfully ({} rows)", dataset.len());
    Ok(dataset)
}

/// Load a funding dataset from any reader (file, upload, in-memory buffer)
///
/// **Public** - used by `load_dataset` and by callers that own the stream
pub fn load_dataset_from_reader<R: Read>(reader: R) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if headers.is_empty() || headers.iter().all(str::is_empty) {
        return Err(LoadError::MissingHeader);
    }

    let header_map = build_header_map(&headers);
    let columns: BTreeSet<Column> = header_map.keys().copied().collect();

    for column in Column::ALL {
        if !columns.contains(&column) {
            warn!("Column '{}' not present in dataset header", column);
        }
    }

    let mut events = Vec::new();
    let mut stats = LoadStats::default();

    for (index, result) in reader.records().enumerate() {
        let record = result?;
        // Header is line 1
        let line = index + 2;
        stats.rows_read += 1;

        let event = parse_record(&record, &header_map, line, &mut stats);
        events.push(event);
    }

    if stats.unparsable_dates > 0 {
        info!(
            "{} row(s) have unknown dates and are excluded from time series",
            stats.unparsable_dates
        );
    }
    if stats.invalid_amounts > 0 {
        info!("{} row(s) have invalid amounts", stats.invalid_amounts);
    }

    Ok(Dataset::new(events, columns, stats))
}

/// Map known columns to their position in the header.
///
/// The first occurrence wins when a header is duplicated.
fn build_header_map(headers: &StringRecord) -> HashMap<Column, usize> {
    let mut map = HashMap::new();
    for (idx, header) in headers.iter().enumerate() {
        if let Some(column) = Column::from_header(header) {
            map.entry(column).or_insert(idx);
        } else {
            debug!("Ignoring unknown column '{}'", header);
        }
    }
    map
}

fn parse_record(
    record: &StringRecord,
    header_map: &HashMap<Column, usize>,
    line: usize,
    stats: &mut LoadStats,
) -> FundingEvent {
    let cell = |column: Column| -> Option<String> {
        header_map
            .get(&column)
            .and_then(|idx| record.get(*idx))
            .and_then(clean_cell)
    };

    let date = match cell(Column::Date) {
        Some(raw) => {
            let parsed = parse_event_date(&raw);
            if parsed.is_none() {
                debug!("Line {}: unparsable date '{}'", line, raw);
                stats.unparsable_dates += 1;
            }
            parsed
        }
        None => {
            if header_map.contains_key(&Column::Date) {
                stats.unparsable_dates += 1;
            }
            None
        }
    };

    let amount = cell(Column::Amount).and_then(|raw| {
        let parsed = parse_amount(&raw);
        if parsed.is_none() {
            debug!("Line {}: invalid amount '{}'", line, raw);
            stats.invalid_amounts += 1;
        }
        parsed
    });

    let startup = cell(Column::Startup).unwrap_or_default();
    if startup.is_empty() {
        stats.blank_startups += 1;
    }

    FundingEvent {
        date,
        startup,
        vertical: cell(Column::Vertical),
        subvertical: cell(Column::Subvertical),
        city: cell(Column::City),
        investors: cell(Column::Investors),
        round: cell(Column::Round),
        amount,
    }
}

/// Trimmed cell value, or `None` for blanks and null literals
fn clean_cell(raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty()
        || NULL_LITERALS
            .iter()
            .any(|null| value.eq_ignore_ascii_case(null))
    {
        None
    } else {
        Some(value.to_string())
    }
}

/// Parse a non-negative, finite amount. Thousands separators are ignored.
fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_cell() {
        assert_eq!(clean_cell("  Bengaluru "), Some("Bengaluru".to_string()));
        assert_eq!(clean_cell(""), None);
        assert_eq!(clean_cell("NaN"), None);
        assert_eq!(clean_cell("null"), None);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("20.5"), Some(20.5));
        assert_eq!(parse_amount("1,200"), Some(1200.0));
        assert_eq!(parse_amount("0"), Some(0.0));
        assert_eq!(parse_amount("-3"), None);
        assert_eq!(parse_amount("undisclosed"), None);
        assert_eq!(parse_amount("inf"), None);
    }

    #[test]
    fn test_load_counts_bad_rows() {
        let csv = "date,startup,amount\n\
                   2020-01-05,A,10\n\
                   garbage,B,abc\n\
                   ,C,\n";
        let dataset = load_dataset_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(dataset.len(), 3);
        let stats = dataset.stats();
        assert_eq!(stats.rows_read, 3);
        assert_eq!(stats.unparsable_dates, 2);
        assert_eq!(stats.invalid_amounts, 1);
        assert_eq!(dataset.events()[1].startup, "B");
        assert_eq!(dataset.events()[1].amount, None);
    }

    #[test]
    fn test_load_rejects_headerless_input() {
        let result = load_dataset_from_reader("".as_bytes());
        assert!(matches!(result, Err(LoadError::MissingHeader)));
    }
}
