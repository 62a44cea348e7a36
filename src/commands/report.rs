//! Report command implementation.
//!
//! The report command:
//! 1. Loads the dataset
//! 2. Runs the query
//! 3. Prints the text summary
//! 4. Writes the JSON report
//! 5. Writes SVG charts

use super::models::{ChartKind, ReportArgs};
use crate::aggregator::run_query;
use crate::charts::{
    generate_bar_chart, generate_line_chart, generate_pie_chart, render_text_report, ChartConfig,
};
use crate::output::{to_document, write_report, write_svg};
use crate::parser::{load_dataset, Breakdown, EntityReport, Metric, Report, ReportQuery};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::Path;
use std::time::Instant;

/// Execute a report command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The computed report. An entity with no matching rows is a successful
/// `NoDataForEntity` report, not an error.
///
/// # Errors
/// * Dataset cannot be loaded
/// * A required column is missing
/// * Output files cannot be written
pub fn execute_report(args: ReportArgs) -> Result<Report> {
    let start_time = Instant::now();

    info!("Step 1/4: Loading dataset...");
    let dataset = load_dataset(&args.data_path)
        .with_context(|| format!("Failed to load dataset {}", args.data_path.display()))?;

    let stats = dataset.stats();
    debug!(
        "Loaded {} rows ({} unknown dates, {} invalid amounts)",
        stats.rows_read, stats.unparsable_dates, stats.invalid_amounts
    );

    info!("Step 2/4: Computing report...");
    let report = run_query(&dataset, &args.query).context("Failed to compute report")?;

    if args.print_summary {
        println!("\n{}", render_text_report(&report));
    }

    info!("Step 3/4: Writing report JSON...");
    if let Some(path) = &args.output_json {
        let document = to_document(
            &args.data_path.display().to_string(),
            args.query.clone(),
            report.clone(),
        );
        write_report(&document, path).context("Failed to write report JSON")?;
        info!("✓ Report written to: {}", path.display());
    } else {
        info!("Skipping JSON output (not requested)");
    }

    info!("Step 4/4: Writing charts...");
    if let Some(dir) = &args.charts_dir {
        let written = write_charts(&report, dir, args.chart_width)?;
        info!("✓ {} chart(s) written to: {}", written, dir.display());
    } else {
        info!("Skipping charts (not requested)");
    }

    let elapsed = start_time.elapsed();
    info!("Report completed in {:.2}s", elapsed.as_secs_f64());

    Ok(report)
}

/// Render and write every chartable series of the report.
///
/// A breakdown with nothing to chart is skipped with a warning; the
/// remaining charts are still written.
///
/// # Returns
/// Number of chart files written
pub fn write_charts(report: &Report, dir: &Path, width: usize) -> Result<usize> {
    let mut written = 0;

    for (title, kind, breakdown, config) in chart_plan(report) {
        let series = match breakdown {
            Breakdown::Ready(series) => series,
            Breakdown::NoChartableData { breakdown } => {
                warn!("No chartable data for '{}', skipping chart", breakdown);
                continue;
            }
        };

        let config = config.with_title(title).with_width(width);
        let rendered = match kind {
            ChartKind::Line => generate_line_chart(&series, Some(&config)),
            ChartKind::Bar => generate_bar_chart(&series, Some(&config)),
            ChartKind::Pie => generate_pie_chart(&series, Some(&config)),
        };

        match rendered {
            Ok(svg) => {
                let path = dir.join(format!("{}.svg", series.name));
                write_svg(&svg, &path)
                    .with_context(|| format!("Failed to write chart {}", path.display()))?;
                written += 1;
            }
            Err(e) => warn!("Skipping chart '{}': {}", series.name, e),
        }
    }

    Ok(written)
}

/// Charts drawn for each report kind
fn chart_plan(report: &Report) -> Vec<(String, ChartKind, Breakdown, ChartConfig)> {
    match report {
        Report::Overall(summary) => {
            let y_label = match summary.metric {
                Metric::Total => "Amount in Cr",
                Metric::Count => "Number of Fundings",
            };
            vec![(
                format!("MoM graph ({:?})", summary.metric),
                ChartKind::Line,
                Breakdown::from_series(summary.month_series.clone()),
                ChartConfig::new().with_axes("Month-Year", y_label),
            )]
        }
        Report::Startup(_) => {
            debug!("Startup reports have no charts");
            Vec::new()
        }
        Report::Investor(EntityReport::Found(profile)) => vec![
            (
                "Biggest Investments".to_string(),
                ChartKind::Bar,
                profile.biggest_investments.clone(),
                ChartConfig::new().with_axes("StartUps", "Funding Amount (Cr)"),
            ),
            (
                "Sectors Invested In".to_string(),
                ChartKind::Pie,
                profile.sectors.clone(),
                ChartConfig::new(),
            ),
            (
                "YoY Investment".to_string(),
                ChartKind::Line,
                profile.yoy_investment.clone(),
                ChartConfig::new().with_axes("Year", "Investment Amount (Cr)"),
            ),
        ],
        Report::Investor(EntityReport::NoDataForEntity { .. }) => Vec::new(),
    }
}

/// Validate report arguments
///
/// **Public** - can be called before execute_report for early validation
pub fn validate_args(args: &ReportArgs) -> Result<()> {
    if args.data_path.as_os_str().is_empty() {
        anyhow::bail!("Dataset path cannot be empty");
    }

    match &args.query {
        ReportQuery::StartupProfile { name } if name.trim().is_empty() => {
            anyhow::bail!("Startup name cannot be empty");
        }
        ReportQuery::InvestorProfile { token, .. } if token.trim().is_empty() => {
            anyhow::bail!("Investor name cannot be empty");
        }
        _ => {}
    }

    if args.chart_width < 200 {
        anyhow::bail!("Chart width must be at least 200 pixels");
    }

    if args.chart_width > 4000 {
        anyhow::bail!("Chart width is too large (max 4000)");
    }

    Ok(())
}
