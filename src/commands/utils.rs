use crate::aggregator::{investor_names, startup_names};
use crate::parser::{load_dataset, Column};
use crate::utils::config::REPORT_SCHEMA_VERSION;
use anyhow::{Context, Result};
use std::path::Path;

/// Load a dataset and print its columns and row statistics
///
/// # Returns
/// Names of the known columns missing from the dataset
pub fn validate_dataset_file(file_path: &Path) -> Result<Vec<Column>> {
    println!("Validating dataset: {}", file_path.display());

    let dataset = load_dataset(file_path)
        .with_context(|| format!("Failed to load dataset {}", file_path.display()))?;
    let stats = dataset.stats();
    let missing = dataset.missing_columns();

    println!("✓ Readable CSV");
    let present: Vec<&str> = dataset.columns().map(Column::name).collect();
    println!("  Columns:          {}", present.join(", "));
    if missing.is_empty() {
        println!("  Missing columns:  none");
    } else {
        let names: Vec<&str> = missing.iter().map(|c| c.name()).collect();
        println!("  Missing columns:  {}", names.join(", "));
    }
    println!("  Rows:             {}", stats.rows_read);
    println!("  Unknown dates:    {}", stats.unparsable_dates);
    println!("  Invalid amounts:  {}", stats.invalid_amounts);
    println!("  Blank startups:   {}", stats.blank_startups);

    Ok(missing)
}

/// Print every startup name, one per line
pub fn list_startups(file_path: &Path) -> Result<()> {
    let dataset = load_dataset(file_path)
        .with_context(|| format!("Failed to load dataset {}", file_path.display()))?;
    for name in startup_names(&dataset)? {
        println!("{}", name);
    }
    Ok(())
}

/// Print every investor name, one per line
pub fn list_investors(file_path: &Path) -> Result<()> {
    let dataset = load_dataset(file_path)
        .with_context(|| format!("Failed to load dataset {}", file_path.display()))?;
    let names = investor_names(&dataset)?;
    if names.is_empty() {
        anyhow::bail!("No investors found in the dataset");
    }
    for name in names {
        println!("{}", name);
    }
    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Funding Report Document Schema");
    println!("Current Version: {}", REPORT_SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string          - Schema version (e.g., '1.0.0')");
        println!("  generated_at: string     - ISO 8601 timestamp");
        println!("  source: string           - Dataset path");
        println!("  query: object            - type: overall_analysis | startup_profile | investor_profile");
        println!("  report: object           - kind: overall | startup | investor, data: payload");
        println!("    overall: total, max_single_startup, avg_per_startup,");
        println!("             distinct_startup_count, month_series");
        println!("    startup: status, total_funding, funding_rounds_count,");
        println!("             primary_vertical, funding_history");
        println!("    investor: status, total_investment, investment_count,");
        println!("              distinct_startup_count, recent_investments,");
        println!("              biggest_investments, sectors, yoy_investment");
        println!("  series: {{ name, points: [{{ label, value }}] }}");
        println!("  table:  {{ name, columns: [string], rows: [[cell]] }}");
        println!("  breakdown status: ready | no_chartable_data");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Funding Report v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", REPORT_SCHEMA_VERSION);
    println!();
    println!("Overall, startup and investor reports from startup-funding CSV data.");
}
