//! Report payload and JSON schema definitions.
//!
//! These are the structures handed to any rendering layer and written to
//! disk by `output::json`. The document is versioned to allow evolution.

use super::event::Column;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// MoM series selector for the overall analysis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Sum of amounts per month
    #[default]
    Total,
    /// Number of events per month
    Count,
}

/// How an investor token is matched against the `investors` cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestorMatch {
    /// Case-insensitive substring of the whole cell
    #[default]
    Substring,
    /// Case-insensitive equality with one comma-separated name
    Token,
}

/// Query selector driving one report request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReportQuery {
    OverallAnalysis {
        metric: Metric,
    },
    StartupProfile {
        name: String,
    },
    InvestorProfile {
        token: String,
        #[serde(default)]
        match_mode: InvestorMatch,
    },
}

/// One (label, value) pair of a chart series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

/// Named, ordered chart series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub points: Vec<SeriesPoint>,
}

impl Series {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: Vec::new(),
        }
    }

    pub fn push(&mut self, label: impl Into<String>, value: f64) {
        self.points.push(SeriesPoint {
            label: label.into(),
            value,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Sum of all point values
    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.value).sum()
    }
}

/// A derived chart that may have nothing eligible to show.
///
/// Each breakdown is independent: one `NoChartableData` never
/// suppresses its siblings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Breakdown {
    Ready(Series),
    NoChartableData { breakdown: String },
}

impl Breakdown {
    /// Wrap a series, degrading to `NoChartableData` when it is empty
    pub fn from_series(series: Series) -> Self {
        if series.is_empty() {
            Breakdown::NoChartableData {
                breakdown: series.name,
            }
        } else {
            Breakdown::Ready(series)
        }
    }

    pub fn series(&self) -> Option<&Series> {
        match self {
            Breakdown::Ready(series) => Some(series),
            Breakdown::NoChartableData { .. } => None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Breakdown::Ready(series) => &series.name,
            Breakdown::NoChartableData { breakdown } => breakdown,
        }
    }
}

/// A single table cell.
///
/// Serialized untagged; on load the cell type comes from its column (see
/// `Table`), so a date-like round label stays text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Date(NaiveDate),
    Text(String),
    Null,
}

impl CellValue {
    pub fn text(value: Option<&str>) -> Self {
        value.map_or(CellValue::Null, |v| CellValue::Text(v.to_string()))
    }

    pub fn number(value: Option<f64>) -> Self {
        value.map_or(CellValue::Null, CellValue::Number)
    }

    pub fn date(value: Option<NaiveDate>) -> Self {
        value.map_or(CellValue::Null, CellValue::Date)
    }
}

/// Named table with a fixed column order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<CellValue>>,
}

/// Table as read from JSON, before cells are typed by column
#[derive(Deserialize)]
struct RawTable {
    name: String,
    columns: Vec<Column>,
    rows: Vec<Vec<Option<RawCell>>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCell {
    Number(f64),
    Text(String),
}

impl TryFrom<RawTable> for Table {
    type Error = String;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        let RawTable {
            name,
            columns,
            rows,
        } = raw;

        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| {
                if row.len() != columns.len() {
                    return Err(format!(
                        "table '{}' row {} has {} cells, expected {}",
                        name,
                        index,
                        row.len(),
                        columns.len()
                    ));
                }
                row.into_iter()
                    .zip(&columns)
                    .map(|(cell, column)| typed_cell(*column, cell))
                    .collect()
            })
            .collect::<Result<Vec<Vec<CellValue>>, String>>()?;

        Ok(Table {
            name,
            columns,
            rows,
        })
    }
}

/// Dates are ISO `%Y-%m-%d`, amounts are numbers, everything else is text
fn typed_cell(column: Column, cell: Option<RawCell>) -> Result<CellValue, String> {
    match (column, cell) {
        (_, None) => Ok(CellValue::Null),
        (Column::Amount, Some(RawCell::Number(value))) => Ok(CellValue::Number(value)),
        (Column::Date, Some(RawCell::Text(text))) => NaiveDate::parse_from_str(&text, "%Y-%m-%d")
            .map(CellValue::Date)
            .map_err(|e| format!("invalid date '{}' in column 'date': {}", text, e)),
        (Column::Amount | Column::Date, Some(other)) => Err(format!(
            "unexpected value {:?} in column '{}'",
            other, column
        )),
        (_, Some(RawCell::Text(text))) => Ok(CellValue::Text(text)),
        (_, Some(RawCell::Number(value))) => Err(format!(
            "unexpected number {} in text column '{}'",
            value, column
        )),
    }
}

impl Table {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at `row` for `column`, if the column is part of the table
    pub fn cell(&self, row: usize, column: Column) -> Option<&CellValue> {
        let idx = self.columns.iter().position(|c| *c == column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }
}

/// Overall analysis payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallSummary {
    pub metric: Metric,

    /// Sum of all known amounts
    pub total: f64,

    /// Largest single-event amount of any startup
    pub max_single_startup: Option<f64>,

    /// Startup holding `max_single_startup` (first encountered on ties)
    pub max_single_startup_name: Option<String>,

    /// Mean of per-startup sums over startups with a positive sum
    pub avg_per_startup: Option<f64>,

    pub distinct_startup_count: usize,

    /// MoM series, ordered by (year, month)
    pub month_series: Series,
}

/// Startup profile payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartupProfile {
    pub startup: String,
    pub total_funding: f64,
    pub funding_rounds_count: usize,
    pub primary_vertical: String,
    pub funding_history: Table,
}

/// Investor profile payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestorProfile {
    pub investor: String,
    pub match_mode: InvestorMatch,
    pub total_investment: f64,
    pub investment_count: usize,
    pub distinct_startup_count: usize,
    pub recent_investments: Table,
    pub biggest_investments: Breakdown,
    pub sectors: Breakdown,
    pub yoy_investment: Breakdown,
}

/// Outcome of an entity report: found, or nothing matched the filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EntityReport<T> {
    Found(T),
    NoDataForEntity { name: String },
}

impl<T> EntityReport<T> {
    pub fn found(&self) -> Option<&T> {
        match self {
            EntityReport::Found(profile) => Some(profile),
            EntityReport::NoDataForEntity { .. } => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, EntityReport::Found(_))
    }
}

/// Any report produced by `aggregator::run_query`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Report {
    Overall(OverallSummary),
    Startup(EntityReport<StartupProfile>),
    Investor(EntityReport<InvestorProfile>),
}

/// Top-level document written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDocument {
    /// Schema version for compatibility checking
    pub version: String,

    /// Timestamp when the report was generated (RFC 3339, UTC)
    pub generated_at: String,

    /// Dataset the report was computed from
    pub source: String,

    pub query: ReportQuery,

    pub report: Report,
}
