//! In-memory funding dataset.
//!
//! A `Dataset` is built once per session (from CSV or from events directly)
//! and is only ever read by the report builders.

use crate::utils::error::ReportError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Known dataset columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    Date,
    Startup,
    Vertical,
    Subvertical,
    City,
    Investors,
    Round,
    Amount,
}

impl Column {
    /// All known columns, in canonical CSV order
    pub const ALL: [Column; 8] = [
        Column::Date,
        Column::Startup,
        Column::Vertical,
        Column::Subvertical,
        Column::City,
        Column::Investors,
        Column::Round,
        Column::Amount,
    ];

    /// Header name as it appears in the CSV
    pub fn name(self) -> &'static str {
        match self {
            Column::Date => "date",
            Column::Startup => "startup",
            Column::Vertical => "vertical",
            Column::Subvertical => "subvertical",
            Column::City => "city",
            Column::Investors => "investors",
            Column::Round => "round",
            Column::Amount => "amount",
        }
    }

    /// Resolve a header cell (trimmed, case-insensitive)
    pub fn from_header(header: &str) -> Option<Column> {
        let header = header.trim().to_ascii_lowercase();
        Column::ALL.into_iter().find(|c| c.name() == header)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Calendar month used for MoM bucketing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthBucket {
    pub year: i32,
    pub month: u32,
}

impl MonthBucket {
    /// X-axis label, `"{month}-{year}"` (e.g. `"1-2020"`)
    pub fn label(&self) -> String {
        format!("{}-{}", self.month, self.year)
    }
}

/// One row of the funding dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundingEvent {
    /// Funding date; `None` when missing or unparsable
    pub date: Option<NaiveDate>,
    pub startup: String,
    pub vertical: Option<String>,
    pub subvertical: Option<String>,
    pub city: Option<String>,
    /// Comma-separated investor names as stored
    pub investors: Option<String>,
    pub round: Option<String>,
    /// Amount in Cr; `None` when unknown
    pub amount: Option<f64>,
}

impl FundingEvent {
    /// Minimal event, mostly for tests and in-memory callers
    pub fn new(startup: impl Into<String>, amount: Option<f64>, date: Option<NaiveDate>) -> Self {
        Self {
            startup: startup.into(),
            amount,
            date,
            ..Default::default()
        }
    }

    pub fn with_investors(mut self, investors: impl Into<String>) -> Self {
        self.investors = Some(investors.into());
        self
    }

    pub fn with_vertical(mut self, vertical: impl Into<String>) -> Self {
        self.vertical = Some(vertical.into());
        self
    }

    pub fn with_round(mut self, round: impl Into<String>) -> Self {
        self.round = Some(round.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Amount counted toward sums (unknown amounts count as zero)
    pub fn amount_or_zero(&self) -> f64 {
        self.amount.unwrap_or(0.0)
    }

    pub fn month_bucket(&self) -> Option<MonthBucket> {
        self.date.map(|d| MonthBucket {
            year: d.year(),
            month: d.month(),
        })
    }

    pub fn year(&self) -> Option<i32> {
        self.date.map(|d| d.year())
    }

    /// Individual investor names: split on `,`, trimmed, blanks dropped
    pub fn investor_names(&self) -> impl Iterator<Item = &str> {
        self.investors
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Row-level counters collected while loading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStats {
    pub rows_read: usize,
    pub unparsable_dates: usize,
    pub invalid_amounts: usize,
    pub blank_startups: usize,
}

/// Immutable funding dataset snapshot
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    events: Vec<FundingEvent>,
    columns: BTreeSet<Column>,
    stats: LoadStats,
}

impl Dataset {
    pub fn new(events: Vec<FundingEvent>, columns: BTreeSet<Column>, stats: LoadStats) -> Self {
        Self {
            events,
            columns,
            stats,
        }
    }

    /// Dataset with every known column present
    pub fn from_events(events: Vec<FundingEvent>) -> Self {
        let stats = LoadStats {
            rows_read: events.len(),
            ..Default::default()
        };
        Self::new(events, Column::ALL.into_iter().collect(), stats)
    }

    /// Events in source order
    pub fn events(&self) -> &[FundingEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn stats(&self) -> LoadStats {
        self.stats
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    pub fn columns(&self) -> impl Iterator<Item = Column> + '_ {
        self.columns.iter().copied()
    }

    pub fn missing_columns(&self) -> Vec<Column> {
        Column::ALL
            .into_iter()
            .filter(|c| !self.has_column(*c))
            .collect()
    }

    /// Check that every column in `required` is present.
    ///
    /// The first missing column (in the order given) is reported.
    pub fn require(&self, required: &[Column]) -> Result<(), ReportError> {
        match required.iter().find(|c| !self.has_column(**c)) {
            Some(missing) => Err(ReportError::MissingColumn(missing.name().to_string())),
            None => Ok(()),
        }
    }
}
