//! Per-investor profile.
//!
//! An event belongs to an investor when the investor token matches its
//! `investors` cell. Each breakdown is computed on its own and degrades to
//! `NoChartableData` independently of the others.

use super::grouping::{build_table, distinct_startups, group_sums, sort_newest_first};
use crate::parser::{
    Breakdown, Column, Dataset, EntityReport, FundingEvent, InvestorMatch, InvestorProfile, Series,
};
use crate::utils::config::{RECENT_N, TOP_N};
use crate::utils::error::ReportError;
use log::{debug, warn};
use std::collections::BTreeMap;

/// Columns the investor profile cannot run without
pub const INVESTOR_COLUMNS: &[Column] = &[Column::Investors, Column::Startup, Column::Amount];

/// Columns shown in the most recent investments table, when present
pub const RECENT_COLUMNS: &[Column] = &[
    Column::Date,
    Column::Startup,
    Column::Vertical,
    Column::City,
    Column::Round,
    Column::Amount,
];

pub const BIGGEST_INVESTMENTS: &str = "biggest_investments";
pub const SECTORS: &str = "sectors";
pub const YOY_INVESTMENT: &str = "yoy_investment";

/// Build the profile of one investor
///
/// **Public** - main entry point for the investor report
///
/// # Arguments
/// * `dataset` - Full dataset snapshot
/// * `token` - Investor name or fragment, matched case-insensitively
/// * `match_mode` - Substring of the whole cell, or equality with one name
///
/// # Returns
/// `EntityReport::NoDataForEntity` when nothing matches (a blank token
/// never matches)
///
/// # Errors
/// * `ReportError::MissingColumn` - `investors`, `startup` or `amount` absent
pub fn investor_profile(
    dataset: &Dataset,
    token: &str,
    match_mode: InvestorMatch,
) -> Result<EntityReport<InvestorProfile>, ReportError> {
    dataset.require(INVESTOR_COLUMNS)?;

    let token = token.trim();
    let needle = token.to_lowercase();

    let mut events: Vec<&FundingEvent> = if needle.is_empty() {
        Vec::new()
    } else {
        dataset
            .events()
            .iter()
            .filter(|e| matches_investor(e, &needle, match_mode))
            .collect()
    };

    if events.is_empty() {
        warn!("No investments found for investor: {}", token);
        return Ok(EntityReport::NoDataForEntity {
            name: token.to_string(),
        });
    }

    debug!(
        "Investor '{}' matched {} events ({:?})",
        token,
        events.len(),
        match_mode
    );

    let total_investment: f64 = events.iter().map(|e| e.amount_or_zero()).sum();
    let investment_count = events.len();
    let distinct_startup_count = distinct_startups(events.iter().copied());

    let biggest_investments = biggest_investments(&events);
    let sectors = if dataset.has_column(Column::Vertical) {
        sectors(&events)
    } else {
        Breakdown::NoChartableData {
            breakdown: SECTORS.to_string(),
        }
    };
    let yoy_investment = yoy_investment(&events);

    for breakdown in [&biggest_investments, &sectors, &yoy_investment] {
        if breakdown.series().is_none() {
            warn!("No chartable data for '{}' of investor {}", breakdown.name(), token);
        }
    }

    sort_newest_first(&mut events);
    events.truncate(RECENT_N);
    let recent_investments = build_table("recent_investments", dataset, RECENT_COLUMNS, &events);

    Ok(EntityReport::Found(InvestorProfile {
        investor: token.to_string(),
        match_mode,
        total_investment,
        investment_count,
        distinct_startup_count,
        recent_investments,
        biggest_investments,
        sectors,
        yoy_investment,
    }))
}

/// Whether `event` belongs to the investor.
///
/// `needle` must already be lowercased.
pub fn matches_investor(event: &FundingEvent, needle: &str, match_mode: InvestorMatch) -> bool {
    match match_mode {
        InvestorMatch::Substring => event
            .investors
            .as_deref()
            .is_some_and(|cell| cell.to_lowercase().contains(needle)),
        InvestorMatch::Token => event
            .investor_names()
            .any(|name| name.to_lowercase() == needle),
    }
}

/// Top startups by summed amount, descending; ties keep encounter order
fn biggest_investments(events: &[&FundingEvent]) -> Breakdown {
    let mut sums = group_sums(
        events
            .iter()
            .filter(|e| !e.startup.is_empty())
            .map(|e| (e.startup.as_str(), e.amount_or_zero())),
    );
    // Stable sort, zero sums fall to the end
    sums.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut series = Series::new(BIGGEST_INVESTMENTS);
    for (startup, sum) in sums.into_iter().take(TOP_N) {
        series.push(startup, sum);
    }
    Breakdown::from_series(series)
}

/// Summed amount per vertical, positive sums only, ordered by vertical
fn sectors(events: &[&FundingEvent]) -> Breakdown {
    let mut sums: BTreeMap<&str, f64> = BTreeMap::new();
    for event in events {
        if let Some(vertical) = event.vertical.as_deref() {
            *sums.entry(vertical).or_insert(0.0) += event.amount_or_zero();
        }
    }

    let mut series = Series::new(SECTORS);
    for (vertical, sum) in sums.into_iter().filter(|(_, sum)| *sum > 0.0) {
        series.push(vertical, sum);
    }
    Breakdown::from_series(series)
}

/// Summed amount per year, positive sums only, ordered by year
fn yoy_investment(events: &[&FundingEvent]) -> Breakdown {
    let mut sums: BTreeMap<i32, f64> = BTreeMap::new();
    for event in events {
        if let Some(year) = event.year() {
            *sums.entry(year).or_insert(0.0) += event.amount_or_zero();
        }
    }

    let mut series = Series::new(YOY_INVESTMENT);
    for (year, sum) in sums.into_iter().filter(|(_, sum)| *sum > 0.0) {
        series.push(year.to_string(), sum);
    }
    Breakdown::from_series(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn funded(startup: &str, amount: f64, year: i32) -> FundingEvent {
        FundingEvent::new(startup, Some(amount), NaiveDate::from_ymd_opt(year, 6, 1))
            .with_investors("Acme Ventures, Beta Capital")
    }

    #[test]
    fn test_substring_and_token_matching() {
        let event = FundingEvent::new("A", None, None).with_investors("Acme Ventures, Beta");

        assert!(matches_investor(&event, "acme", InvestorMatch::Substring));
        assert!(!matches_investor(&event, "acme", InvestorMatch::Token));
        assert!(matches_investor(&event, "acme ventures", InvestorMatch::Token));
        assert!(matches_investor(&event, "beta", InvestorMatch::Token));
    }

    #[test]
    fn test_biggest_investments_ties_keep_encounter_order() {
        let a = funded("A", 10.0, 2020);
        let b = funded("B", 30.0, 2020);
        let c = funded("C", 10.0, 2020);
        let events = vec![&a, &b, &c];

        let breakdown = biggest_investments(&events);
        let labels: Vec<&str> = breakdown
            .series()
            .unwrap()
            .points
            .iter()
            .map(|p| p.label.as_str())
            .collect();
        assert_eq!(labels, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_biggest_investments_keeps_top_five() {
        let owned: Vec<FundingEvent> = (1..=7)
            .map(|i| funded(&format!("S{}", i), i as f64, 2020))
            .collect();
        let events: Vec<&FundingEvent> = owned.iter().collect();

        let breakdown = biggest_investments(&events);
        let series = breakdown.series().unwrap();
        assert_eq!(series.len(), TOP_N);
        assert_eq!(series.points[0].label, "S7");
        assert_eq!(series.points[4].label, "S3");
    }

    #[test]
    fn test_biggest_investments_keeps_unknown_amounts() {
        let a = funded("A", 10.0, 2020);
        let b = FundingEvent::new("B", None, NaiveDate::from_ymd_opt(2020, 3, 1));
        let events = vec![&b, &a];

        let breakdown = biggest_investments(&events);
        let series = breakdown.series().unwrap();
        let points: Vec<(&str, f64)> = series
            .points
            .iter()
            .map(|p| (p.label.as_str(), p.value))
            .collect();
        assert_eq!(points, vec![("A", 10.0), ("B", 0.0)]);
    }

    #[test]
    fn test_biggest_investments_all_unknown_still_chartable() {
        let a = FundingEvent::new("A", None, None);
        let events = vec![&a];

        let breakdown = biggest_investments(&events);
        assert_eq!(breakdown.name(), BIGGEST_INVESTMENTS);
        assert_eq!(breakdown.series().map(|s| s.total()), Some(0.0));
    }

    #[test]
    fn test_yoy_drops_zero_years() {
        let a = funded("A", 5.0, 2019);
        let b = FundingEvent::new("B", None, NaiveDate::from_ymd_opt(2020, 1, 1));
        let c = funded("C", 7.0, 2018);
        let events = vec![&a, &b, &c];

        let breakdown = yoy_investment(&events);
        let series = breakdown.series().unwrap();
        let labels: Vec<&str> = series.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["2018", "2019"]);
    }

    #[test]
    fn test_sectors_without_verticals_not_chartable() {
        let a = funded("A", 5.0, 2019);
        let events = vec![&a];
        assert_eq!(
            sectors(&events),
            Breakdown::NoChartableData {
                breakdown: SECTORS.to_string()
            }
        );
    }
}
