//! Query dispatch and selector lists.

use super::{investor_profile, overall_summary, startup_profile};
use crate::parser::{Column, Dataset, Report, ReportQuery};
use crate::utils::error::ReportError;
use log::info;
use std::collections::BTreeSet;

/// Run one report request against the dataset
///
/// **Public** - single entry point used by the CLI
///
/// # Errors
/// * `ReportError::MissingColumn` - the selected report needs a column the
///   dataset does not have
pub fn run_query(dataset: &Dataset, query: &ReportQuery) -> Result<Report, ReportError> {
    match query {
        ReportQuery::OverallAnalysis { metric } => {
            info!("Running overall analysis ({:?})", metric);
            overall_summary(dataset, *metric).map(Report::Overall)
        }
        ReportQuery::StartupProfile { name } => {
            info!("Running startup profile for: {}", name);
            startup_profile(dataset, name).map(Report::Startup)
        }
        ReportQuery::InvestorProfile { token, match_mode } => {
            info!("Running investor profile for: {}", token);
            investor_profile(dataset, token, *match_mode).map(Report::Investor)
        }
    }
}

/// Sorted, de-duplicated startup names
///
/// # Errors
/// * `ReportError::MissingColumn` - `startup` absent
pub fn startup_names(dataset: &Dataset) -> Result<Vec<String>, ReportError> {
    dataset.require(&[Column::Startup])?;

    let names: BTreeSet<&str> = dataset
        .events()
        .iter()
        .map(|e| e.startup.as_str())
        .filter(|name| !name.is_empty())
        .collect();

    Ok(names.into_iter().map(str::to_string).collect())
}

/// Sorted, de-duplicated investor names taken from every `investors` cell
///
/// # Errors
/// * `ReportError::MissingColumn` - `investors` absent
pub fn investor_names(dataset: &Dataset) -> Result<Vec<String>, ReportError> {
    dataset.require(&[Column::Investors])?;

    let names: BTreeSet<&str> = dataset
        .events()
        .iter()
        .flat_map(|e| e.investor_names())
        .collect();

    Ok(names.into_iter().map(str::to_string).collect())
}
