//! CLI command implementations.
//!
//! Commands orchestrate the library components to perform user tasks.

pub mod models;
pub mod report;
pub mod utils;

// Re-export main command functions
pub use models::{ChartKind, ReportArgs};
pub use report::{execute_report, validate_args, write_charts};
pub use utils::{display_schema, display_version, list_investors, list_startups, validate_dataset_file};
