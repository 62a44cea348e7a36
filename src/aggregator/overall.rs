//! Overall analysis across the whole dataset.
//!
//! Produces the headline metrics (total, max single startup, average per
//! startup, funded startups) and the MoM series.

use super::grouping::{distinct_startups, group_sums};
use crate::parser::{Column, Dataset, Metric, MonthBucket, OverallSummary, Series};
use crate::utils::error::ReportError;
use log::debug;
use std::collections::BTreeMap;

/// Columns the overall analysis cannot run without
pub const OVERALL_COLUMNS: &[Column] = &[Column::Startup, Column::Amount, Column::Date];

/// Name of the MoM series in the payload
pub const MONTH_SERIES: &str = "mom";

/// Compute the overall summary
///
/// **Public** - main entry point for the overall report
///
/// # Arguments
/// * `dataset` - Full dataset snapshot
/// * `metric` - Whether the MoM series sums amounts or counts events
///
/// # Returns
/// Zeroed metrics and an empty series for an empty dataset
///
/// # Errors
/// * `ReportError::MissingColumn` - `startup`, `amount` or `date` absent
pub fn overall_summary(dataset: &Dataset, metric: Metric) -> Result<OverallSummary, ReportError> {
    dataset.require(OVERALL_COLUMNS)?;

    let events = dataset.events();
    debug!("Computing overall summary over {} events", events.len());

    let total: f64 = events.iter().map(|e| e.amount_or_zero()).sum();

    // Strictly greater keeps the first startup on ties
    let mut max_single: Option<(f64, &str)> = None;
    for event in events.iter().filter(|e| !e.startup.is_empty()) {
        if let Some(amount) = event.amount {
            if max_single.map_or(true, |(best, _)| amount > best) {
                max_single = Some((amount, event.startup.as_str()));
            }
        }
    }

    let per_startup = group_sums(
        events
            .iter()
            .filter(|e| !e.startup.is_empty())
            .map(|e| (e.startup.as_str(), e.amount_or_zero())),
    );
    // Only startups with a known positive sum enter the mean
    let funded: Vec<f64> = per_startup
        .iter()
        .map(|(_, sum)| *sum)
        .filter(|sum| *sum > 0.0)
        .collect();
    let avg_per_startup = if funded.is_empty() {
        None
    } else {
        Some(funded.iter().sum::<f64>() / funded.len() as f64)
    };

    Ok(OverallSummary {
        metric,
        total,
        max_single_startup: max_single.map(|(amount, _)| amount),
        max_single_startup_name: max_single.map(|(_, name)| name.to_string()),
        avg_per_startup,
        distinct_startup_count: distinct_startups(events),
        month_series: month_series(dataset, metric),
    })
}

/// Bucket events by (year, month); events with unknown dates are skipped
fn month_series(dataset: &Dataset, metric: Metric) -> Series {
    let mut buckets: BTreeMap<MonthBucket, (f64, usize)> = BTreeMap::new();

    for event in dataset.events() {
        if let Some(bucket) = event.month_bucket() {
            let entry = buckets.entry(bucket).or_insert((0.0, 0));
            entry.0 += event.amount_or_zero();
            entry.1 += 1;
        }
    }

    let mut series = Series::new(MONTH_SERIES);
    for (bucket, (sum, count)) in buckets {
        let value = match metric {
            Metric::Total => sum,
            Metric::Count => count as f64,
        };
        series.push(bucket.label(), value);
    }
    series
}
