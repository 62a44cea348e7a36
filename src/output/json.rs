//! JSON report output writer.
//!
//! Writes `ReportDocument`s to JSON files with pretty formatting.

use super::ensure_parent_dir;
use super::validate_output_path;
use crate::parser::{Report, ReportDocument, ReportQuery};
use crate::utils::config::REPORT_SCHEMA_VERSION;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Wrap a report in the versioned document envelope
///
/// **Public** - stamps schema version and generation time
pub fn to_document(source: &str, query: ReportQuery, report: Report) -> ReportDocument {
    ReportDocument {
        version: REPORT_SCHEMA_VERSION.to_string(),
        generated_at: chrono::Utc::now().to_rfc3339(),
        source: source.to_string(),
        query,
        report,
    }
}

/// Write a report document to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report(
    document: &ReportDocument,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing report to: {}", output_path.display());

    validate_output_path(output_path)?;
    ensure_parent_dir(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, document).map_err(OutputError::SerializationFailed)?;

    info!(
        "Report written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Serialize a report document to a pretty JSON string
pub fn report_to_string(document: &ReportDocument) -> Result<String, OutputError> {
    serde_json::to_string_pretty(document).map_err(OutputError::SerializationFailed)
}

/// Read a report document from a JSON file
///
/// **Public** - useful for validation and testing
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_report(input_path: impl AsRef<Path>) -> Result<ReportDocument, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading report from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;

    let document: ReportDocument =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Report loaded: version {}, source {}",
        document.version, document.source
    );

    Ok(document)
}

fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{EntityReport, Metric, OverallSummary, Series};
    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    fn create_test_document() -> ReportDocument {
        let mut series = Series::new("mom");
        series.push("1-2020", 30.0);
        to_document(
            "startup_cleaned.csv",
            ReportQuery::OverallAnalysis {
                metric: Metric::Total,
            },
            Report::Overall(OverallSummary {
                metric: Metric::Total,
                total: 30.0,
                max_single_startup: Some(20.0),
                max_single_startup_name: Some("B".to_string()),
                avg_per_startup: Some(15.0),
                distinct_startup_count: 2,
                month_series: series,
            }),
        )
    }

    #[test]
    fn test_write_and_read_report() {
        let document = create_test_document();
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_report(&document, path).unwrap();
        let loaded = read_report(path).unwrap();

        assert_eq!(loaded, document);
    }

    #[test]
    fn test_document_envelope() {
        let document = create_test_document();
        assert_eq!(document.version, REPORT_SCHEMA_VERSION);
        assert!(chrono::DateTime::parse_from_rfc3339(&document.generated_at).is_ok());
    }

    #[test]
    fn test_not_found_serializes_status() {
        let document = to_document(
            "data.csv",
            ReportQuery::StartupProfile {
                name: "Ghost".to_string(),
            },
            Report::Startup(EntityReport::NoDataForEntity {
                name: "Ghost".to_string(),
            }),
        );

        let json: serde_json::Value =
            serde_json::from_str(&report_to_string(&document).unwrap()).unwrap();
        assert_eq!(json["report"]["kind"], "startup");
        assert_eq!(json["report"]["data"]["status"], "no_data_for_entity");
        assert_eq!(json["query"]["type"], "startup_profile");
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/report.json");

        write_report(&create_test_document(), &nested_path).unwrap();

        assert!(nested_path.exists());
    }
}
