//! Dataset loading and report schema definitions.
//!
//! This module handles:
//! - Reading funding CSV files into an immutable `Dataset`
//! - Lenient date and amount parsing
//! - Defining the report payloads and output schema

pub mod dates;
pub mod event;
pub mod funding_csv;
pub mod schema;

// Re-export main types
pub use dates::parse_event_date;
pub use event::{Column, Dataset, FundingEvent, LoadStats, MonthBucket};
pub use funding_csv::{load_dataset, load_dataset_from_reader};
pub use schema::{
    Breakdown, CellValue, EntityReport, InvestorMatch, InvestorProfile, Metric, OverallSummary,
    Report, ReportDocument, ReportQuery, Series, SeriesPoint, StartupProfile, Table,
};
