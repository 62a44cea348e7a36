//! Plain-text rendering of reports for the terminal.

use crate::parser::{
    Breakdown, CellValue, EntityReport, InvestorProfile, OverallSummary, Report, StartupProfile,
    Table,
};
use crate::utils::config::AMOUNT_UNIT;

const RULE_WIDTH: usize = 80;

/// Render any report as a human-readable text block
pub fn render_text_report(report: &Report) -> String {
    let mut lines = Vec::new();
    lines.push("=".repeat(RULE_WIDTH));

    match report {
        Report::Overall(summary) => render_overall(summary, &mut lines),
        Report::Startup(EntityReport::Found(profile)) => render_startup(profile, &mut lines),
        Report::Investor(EntityReport::Found(profile)) => render_investor(profile, &mut lines),
        Report::Startup(EntityReport::NoDataForEntity { name }) => {
            lines.push(format!("No data found for startup: {}", name));
        }
        Report::Investor(EntityReport::NoDataForEntity { name }) => {
            lines.push(format!("No investments found for investor: {}", name));
        }
    }

    lines.push("=".repeat(RULE_WIDTH));
    lines.join("\n")
}

/// Amount with the unit suffix, `-` when unknown
pub fn format_amount(amount: Option<f64>) -> String {
    match amount {
        Some(value) => format!("{:.2} {}", value, AMOUNT_UNIT),
        None => "-".to_string(),
    }
}

fn render_overall(summary: &OverallSummary, lines: &mut Vec<String>) {
    lines.push("OVERALL ANALYSIS".to_string());
    lines.push("=".repeat(RULE_WIDTH));
    lines.push(format!("Total:           {}", format_amount(Some(summary.total))));
    lines.push(format!(
        "Max:             {}{}",
        format_amount(summary.max_single_startup),
        summary
            .max_single_startup_name
            .as_deref()
            .map(|name| format!(" ({})", name))
            .unwrap_or_default()
    ));
    lines.push(format!("Avg:             {}", format_amount(summary.avg_per_startup)));
    lines.push(format!("Funded Startups: {}", summary.distinct_startup_count));
    lines.push(String::new());
    lines.push(format!("MoM ({:?})", summary.metric));

    if summary.month_series.is_empty() {
        lines.push("  (no dated events)".to_string());
    }
    for point in &summary.month_series.points {
        lines.push(format!("  {:<10} {:>14.2}", point.label, point.value));
    }
}

fn render_startup(profile: &StartupProfile, lines: &mut Vec<String>) {
    lines.push(format!("{} ANALYSIS", profile.startup.to_uppercase()));
    lines.push("=".repeat(RULE_WIDTH));
    lines.push(format!("Total Funding:  {}", format_amount(Some(profile.total_funding))));
    lines.push(format!("Funding Rounds: {}", profile.funding_rounds_count));
    lines.push(format!("Vertical:       {}", profile.primary_vertical));
    lines.push(String::new());
    lines.push("Funding History".to_string());
    render_table(&profile.funding_history, lines);
}

fn render_investor(profile: &InvestorProfile, lines: &mut Vec<String>) {
    lines.push(profile.investor.to_uppercase());
    lines.push("=".repeat(RULE_WIDTH));
    lines.push(format!(
        "Total Investment:      {}",
        format_amount(Some(profile.total_investment))
    ));
    lines.push(format!("Number of Investments: {}", profile.investment_count));
    lines.push(format!("Unique Startups:       {}", profile.distinct_startup_count));
    lines.push(String::new());
    lines.push("Most Recent Investments".to_string());
    render_table(&profile.recent_investments, lines);

    for (title, breakdown) in [
        ("Biggest Investments", &profile.biggest_investments),
        ("Sectors Invested In", &profile.sectors),
        ("YoY Investment", &profile.yoy_investment),
    ] {
        lines.push(String::new());
        lines.push(title.to_string());
        render_breakdown(breakdown, lines);
    }
}

fn render_breakdown(breakdown: &Breakdown, lines: &mut Vec<String>) {
    match breakdown {
        Breakdown::Ready(series) => {
            let total = series.total();
            for point in &series.points {
                let share = if total > 0.0 {
                    point.value / total * 100.0
                } else {
                    0.0
                };
                lines.push(format!(
                    "  {:<30} {:>14.2} {:>6.1}%",
                    truncate(&point.label, 30),
                    point.value,
                    share
                ));
            }
        }
        Breakdown::NoChartableData { .. } => {
            lines.push("  (no chartable data)".to_string());
        }
    }
}

fn render_table(table: &Table, lines: &mut Vec<String>) {
    if table.columns.is_empty() {
        lines.push("  (no columns available)".to_string());
        return;
    }

    let header: Vec<String> = table
        .columns
        .iter()
        .map(|c| format!("{:<18}", c.name()))
        .collect();
    lines.push(format!("  {}", header.join(" ")));

    if table.is_empty() {
        lines.push("  (no rows)".to_string());
    }
    for row in &table.rows {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| format!("{:<18}", truncate(&cell_text(cell), 18)))
            .collect();
        lines.push(format!("  {}", cells.join(" ")));
    }
}

fn cell_text(cell: &CellValue) -> String {
    match cell {
        CellValue::Number(value) => format!("{:.2}", value),
        CellValue::Date(date) => date.format("%Y-%m-%d").to_string(),
        CellValue::Text(text) => text.clone(),
        CellValue::Null => "-".to_string(),
    }
}

/// Shorten to `max` characters, ending with `...` when cut
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}
