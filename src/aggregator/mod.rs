//! Aggregation of funding events into report payloads.
//!
//! Every builder takes an immutable `Dataset` and returns a fresh payload:
//! - Overall analysis (headline metrics and MoM series)
//! - Startup profile (totals and funding history)
//! - Investor profile (totals, recent investments and breakdowns)

pub mod grouping;
pub mod investor;
pub mod overall;
pub mod query;
pub mod startup;

// Re-export main functions
pub use investor::{investor_profile, matches_investor};
pub use overall::overall_summary;
pub use query::{investor_names, run_query, startup_names};
pub use startup::startup_profile;
