//! Funding Report
//!
//! Overall, startup and investor reports computed from
//! startup-funding CSV data.
//!
//! This crate provides the core implementation for the
//! `funding-report` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! funding-report --data startup_cleaned.csv overall --metric count
//! funding-report investor --name "Sequoia Capital" --charts charts/
//! ```
//!
//! Library callers load a `Dataset` once and run any number of queries:
//!
//! ```ignore
//! let dataset = funding_report::parser::load_dataset("startup_cleaned.csv")?;
//! let report = funding_report::aggregator::run_query(&dataset, &query)?;
//! ```

pub mod aggregator;
pub mod charts;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
