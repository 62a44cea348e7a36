use crate::parser::{Metric, ReportQuery};
use crate::utils::config::{DEFAULT_CHART_WIDTH, DEFAULT_DATA_PATH};
use std::path::PathBuf;

/// Arguments for the report commands
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ReportArgs {
    /// Funding CSV to load
    pub data_path: PathBuf,

    /// Report to compute
    pub query: ReportQuery,

    /// Output path for the JSON report (optional)
    pub output_json: Option<PathBuf>,

    /// Directory for SVG charts (optional)
    pub charts_dir: Option<PathBuf>,

    /// Chart width in pixels
    pub chart_width: usize,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for ReportArgs {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            query: ReportQuery::OverallAnalysis {
                metric: Metric::Total,
            },
            output_json: None,
            charts_dir: None,
            chart_width: DEFAULT_CHART_WIDTH,
            print_summary: true,
        }
    }
}

/// Kind of chart drawn for a series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
}
