//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while loading a funding dataset
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to open dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV read failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Dataset has no header row")]
    MissingHeader,
}

/// Errors that abort a single report request.
///
/// Empty filters and empty breakdowns are not errors; they are
/// reported through the result types in `parser::schema`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("'{0}' column not found in the dataset")]
    MissingColumn(String),
}

/// Errors that can occur during chart generation
#[derive(Error, Debug, PartialEq)]
pub enum ChartError {
    #[error("Series '{0}' has no points to draw")]
    EmptySeries(String),

    #[error("Series '{0}' has no positive total to divide into slices")]
    NonPositiveTotal(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
