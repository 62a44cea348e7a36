//! Chart and text rendering for report payloads.
//!
//! This module converts report series into SVG charts (line, bar, pie)
//! and whole reports into terminal text.

pub mod generator;
pub mod summary;

// Re-export main types
pub use generator::{
    escape_xml, generate_bar_chart, generate_line_chart, generate_pie_chart, ChartConfig,
};
pub use summary::{format_amount, render_text_report};
