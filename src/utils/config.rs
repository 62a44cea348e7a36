//! Configuration and constants for the CLI and the report builders.

/// Current report document schema version
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Dataset loaded when neither `--data` nor the environment variable is given
pub const DEFAULT_DATA_PATH: &str = "startup_cleaned.csv";

/// Environment variable consulted for the dataset path
pub const DATA_PATH_ENV: &str = "FUNDING_REPORT_DATA";

/// Display suffix for amounts (Crore). Amounts are never converted.
pub const AMOUNT_UNIT: &str = "Cr";

/// Placeholder for a label that has no value in any row
pub const NOT_AVAILABLE: &str = "N/A";

/// Number of startups kept in the "biggest investments" breakdown
pub const TOP_N: usize = 5;

/// Number of rows kept in the "most recent investments" table
pub const RECENT_N: usize = 5;

/// Cell literals treated as missing values (compared case-insensitively)
pub const NULL_LITERALS: &[&str] = &["nan", "null", "none", "n/a", "na", "nat"];

/// Date layouts accepted for the `date` column, tried in order.
/// Month-first comes before day-first for slash-separated dates.
pub const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%Y.%m.%d",
    "%d.%m.%Y",
];

/// Default chart dimensions in pixels
pub const DEFAULT_CHART_WIDTH: usize = 960;
pub const DEFAULT_CHART_HEIGHT: usize = 540;
