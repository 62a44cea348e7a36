//! Funding Report CLI
//!
//! Loads a startup-funding CSV and prints overall, startup or investor
//! reports, optionally writing a JSON document and SVG charts.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use funding_report::commands::{
    display_schema, display_version, execute_report, list_investors, list_startups,
    validate_args, validate_dataset_file, ReportArgs,
};
use funding_report::parser::{InvestorMatch, Metric, ReportQuery};
use funding_report::utils::config::{DATA_PATH_ENV, DEFAULT_CHART_WIDTH, DEFAULT_DATA_PATH};

/// Funding Report - startup funding analysis
#[derive(Parser, Debug)]
#[command(name = "funding-report")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Funding CSV to load
    #[arg(short, long, global = true, env = DATA_PATH_ENV, default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Output options shared by the report commands
#[derive(Args, Debug)]
struct OutputOpts {
    /// Output path for the JSON report (optional)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for SVG charts (optional)
    #[arg(short, long)]
    charts: Option<PathBuf>,

    /// Chart width in pixels
    #[arg(long, default_value_t = DEFAULT_CHART_WIDTH)]
    width: usize,

    /// Do not print the text summary
    #[arg(short, long)]
    quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Overall analysis with the MoM graph
    Overall {
        /// MoM series type
        #[arg(short, long, value_enum, default_value_t = Metric::Total)]
        metric: Metric,

        #[command(flatten)]
        out: OutputOpts,
    },

    /// Profile of one startup
    Startup {
        /// Startup name (exact, case-sensitive)
        #[arg(short, long)]
        name: String,

        #[command(flatten)]
        out: OutputOpts,
    },

    /// Profile of one investor
    Investor {
        /// Investor name, matched case-insensitively
        #[arg(short, long)]
        name: String,

        /// Match whole comma-separated names instead of substrings
        #[arg(long)]
        exact: bool,

        #[command(flatten)]
        out: OutputOpts,
    },

    /// List startup names
    Startups,

    /// List investor names
    Investors,

    /// Validate a dataset and show its columns
    Validate,

    /// Display report schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Overall { metric, out } => {
            run_report(cli.data, ReportQuery::OverallAnalysis { metric }, out)?;
        }

        Commands::Startup { name, out } => {
            run_report(cli.data, ReportQuery::StartupProfile { name }, out)?;
        }

        Commands::Investor { name, exact, out } => {
            run_report(cli.data, investor_query(name, exact), out)?;
        }

        Commands::Startups => {
            list_startups(&cli.data)?;
        }

        Commands::Investors => {
            list_investors(&cli.data)?;
        }

        Commands::Validate => {
            validate_dataset_file(&cli.data)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// `--exact` selects whole-name matching, substring otherwise
fn investor_query(name: String, exact: bool) -> ReportQuery {
    let match_mode = if exact {
        InvestorMatch::Token
    } else {
        InvestorMatch::Substring
    };
    ReportQuery::InvestorProfile {
        token: name,
        match_mode,
    }
}

/// Build report args, validate and execute
///
/// **Private** - shared by the three report commands
fn run_report(data: PathBuf, query: ReportQuery, out: OutputOpts) -> Result<()> {
    let args = ReportArgs {
        data_path: data,
        query,
        output_json: out.output,
        charts_dir: out.charts,
        chart_width: out.width,
        print_summary: !out.quiet,
    };

    validate_args(&args)?;

    // An entity with no rows is already reported by the builder
    execute_report(args)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed_investor_query(args: &[&str]) -> ReportQuery {
        let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
        match cli.command {
            Commands::Investor { name, exact, .. } => investor_query(name, exact),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_investor_exact_flag_selects_token_matching() {
        let query = parsed_investor_query(&["funding-report", "investor", "--name", "Acme", "--exact"]);
        assert_eq!(
            query,
            ReportQuery::InvestorProfile {
                token: "Acme".to_string(),
                match_mode: InvestorMatch::Token,
            }
        );
    }

    #[test]
    fn test_investor_defaults_to_substring_matching() {
        let query = parsed_investor_query(&["funding-report", "investor", "-n", "Acme"]);
        assert_eq!(
            query,
            ReportQuery::InvestorProfile {
                token: "Acme".to_string(),
                match_mode: InvestorMatch::Substring,
            }
        );
    }
}
