//! SVG chart generation for report series.
//!
//! Charts are written as plain SVG strings:
//! - Line chart for MoM and YoY series
//! - Bar chart for biggest investments (value label on every bar)
//! - Pie chart for sector shares

use crate::parser::Series;
use crate::utils::config::{AMOUNT_UNIT, DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH};
use crate::utils::error::ChartError;
use log::info;
use std::f64::consts::PI;

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 90.0;

const PALETTE: &[&str] = &[
    "rgb(31, 119, 180)",
    "rgb(255, 127, 14)",
    "rgb(44, 160, 44)",
    "rgb(214, 39, 40)",
    "rgb(148, 103, 189)",
    "rgb(140, 86, 75)",
    "rgb(227, 119, 194)",
    "rgb(127, 127, 127)",
    "rgb(188, 189, 34)",
    "rgb(23, 190, 207)",
];

/// Chart configuration
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub title: String,
    pub width: usize,
    pub height: usize,
    pub x_label: String,
    pub y_label: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            width: DEFAULT_CHART_WIDTH,
            height: DEFAULT_CHART_HEIGHT,
            x_label: String::new(),
            y_label: format!("Amount ({})", AMOUNT_UNIT),
        }
    }
}

impl ChartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_axes(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
}

/// Plot area derived from the config
struct Frame {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl Frame {
    fn new(config: &ChartConfig) -> Self {
        Self {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width: (config.width as f64 - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
            height: (config.height as f64 - MARGIN_TOP - MARGIN_BOTTOM).max(1.0),
        }
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn y_for(&self, value: f64, max: f64) -> f64 {
        self.bottom() - (value / max) * self.height
    }
}

/// Generate an SVG line chart with a marker and value label on each point
pub fn generate_line_chart(
    series: &Series,
    config: Option<&ChartConfig>,
) -> Result<String, ChartError> {
    ensure_points(series)?;
    let config = config.cloned().unwrap_or_default();
    info!("Generating line chart '{}' with {} points", series.name, series.len());

    let frame = Frame::new(&config);
    let max = axis_max(series);
    let step = if series.len() > 1 {
        frame.width / (series.len() - 1) as f64
    } else {
        0.0
    };
    let x_for = |i: usize| {
        if series.len() > 1 {
            frame.left + i as f64 * step
        } else {
            frame.left + frame.width / 2.0
        }
    };

    let mut svg = open_svg(&config);
    render_axes(&mut svg, &frame, &config, max);

    let points: Vec<String> = series
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{:.2},{:.2}", x_for(i), frame.y_for(p.value, max)))
        .collect();
    svg.push_str(&format!(
        r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="2"/>"#,
        points.join(" "),
        PALETTE[0]
    ));

    for (i, point) in series.points.iter().enumerate() {
        let x = x_for(i);
        let y = frame.y_for(point.value, max);
        svg.push_str(&format!(
            r#"<circle cx="{:.2}" cy="{:.2}" r="4" fill="{}"><title>{}: {:.1}</title></circle>"#,
            x,
            y,
            PALETTE[0],
            escape_xml(&point.label),
            point.value
        ));
        svg.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}" font-size="10" text-anchor="middle">{:.1}</text>"#,
            x,
            y - 8.0,
            point.value
        ));
        render_x_label(&mut svg, x, frame.bottom(), &point.label);
    }

    svg.push_str("</svg>");
    Ok(svg)
}

/// Generate an SVG bar chart with a `{:.1}` value label above each bar
pub fn generate_bar_chart(
    series: &Series,
    config: Option<&ChartConfig>,
) -> Result<String, ChartError> {
    ensure_points(series)?;
    let config = config.cloned().unwrap_or_default();
    info!("Generating bar chart '{}' with {} bars", series.name, series.len());

    let frame = Frame::new(&config);
    let max = axis_max(series);
    let slot = frame.width / series.len() as f64;
    let bar_width = slot * 0.7;

    let mut svg = open_svg(&config);
    render_axes(&mut svg, &frame, &config, max);

    for (i, point) in series.points.iter().enumerate() {
        let x = frame.left + i as f64 * slot + (slot - bar_width) / 2.0;
        let y = frame.y_for(point.value.max(0.0), max);
        let height = frame.bottom() - y;
        svg.push_str(&format!(
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"><title>{}: {:.1}</title></rect>"#,
            x,
            y,
            bar_width,
            height,
            PALETTE[i % PALETTE.len()],
            escape_xml(&point.label),
            point.value
        ));
        svg.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}" font-size="11" text-anchor="middle">{:.1}</text>"#,
            x + bar_width / 2.0,
            y - 4.0,
            point.value
        ));
        render_x_label(&mut svg, x + bar_width / 2.0, frame.bottom(), &point.label);
    }

    svg.push_str("</svg>");
    Ok(svg)
}

/// Generate an SVG pie chart; each slice is labelled with its `{:.1}%` share
///
/// # Errors
/// * `ChartError::EmptySeries` - no points
/// * `ChartError::NonPositiveTotal` - positive values sum to zero
pub fn generate_pie_chart(
    series: &Series,
    config: Option<&ChartConfig>,
) -> Result<String, ChartError> {
    ensure_points(series)?;
    let total: f64 = series.points.iter().map(|p| p.value.max(0.0)).sum();
    if total <= 0.0 {
        return Err(ChartError::NonPositiveTotal(series.name.clone()));
    }

    let config = config.cloned().unwrap_or_default();
    info!("Generating pie chart '{}' with {} slices", series.name, series.len());

    let cx = config.width as f64 / 2.0;
    let cy = (config.height as f64 + MARGIN_TOP) / 2.0;
    let radius = ((config.height as f64 - MARGIN_TOP) / 2.0 - 40.0).max(10.0);

    let mut svg = open_svg(&config);

    // Start at 12 o'clock, clockwise
    let mut angle = -PI / 2.0;
    for (i, point) in series.points.iter().enumerate() {
        let value = point.value.max(0.0);
        if value <= 0.0 {
            continue;
        }
        let share = value / total;
        let sweep = share * 2.0 * PI;
        let color = PALETTE[i % PALETTE.len()];
        let title = format!("{}: {:.1}", escape_xml(&point.label), point.value);

        if share >= 1.0 {
            svg.push_str(&format!(
                r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}"><title>{}</title></circle>"#,
                cx, cy, radius, color, title
            ));
        } else {
            let (x1, y1) = (cx + radius * angle.cos(), cy + radius * angle.sin());
            let end = angle + sweep;
            let (x2, y2) = (cx + radius * end.cos(), cy + radius * end.sin());
            let large_arc = if sweep > PI { 1 } else { 0 };
            svg.push_str(&format!(
                r#"<path d="M {:.2} {:.2} L {:.2} {:.2} A {:.2} {:.2} 0 {} 1 {:.2} {:.2} Z" fill="{}" stroke="white"><title>{}</title></path>"#,
                cx, cy, x1, y1, radius, radius, large_arc, x2, y2, color, title
            ));
        }

        let mid = angle + sweep / 2.0;
        let (lx, ly) = (
            cx + (radius + 18.0) * mid.cos(),
            cy + (radius + 18.0) * mid.sin(),
        );
        let anchor = if mid.cos() >= 0.0 { "start" } else { "end" };
        svg.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}" font-size="11" text-anchor="{}">{} ({:.1}%)</text>"#,
            lx,
            ly,
            anchor,
            escape_xml(&point.label),
            share * 100.0
        ));

        angle += sweep;
    }

    svg.push_str("</svg>");
    Ok(svg)
}

fn ensure_points(series: &Series) -> Result<(), ChartError> {
    if series.is_empty() {
        Err(ChartError::EmptySeries(series.name.clone()))
    } else {
        Ok(())
    }
}

/// Upper bound of the value axis; never zero
fn axis_max(series: &Series) -> f64 {
    let max = series
        .points
        .iter()
        .map(|p| p.value)
        .fold(0.0_f64, f64::max);
    if max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

fn open_svg(config: &ChartConfig) -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = config.width,
        h = config.height
    );
    svg.push_str(r#"<style>text { font-family: sans-serif; }</style>"#);
    svg.push_str(&format!(
        r#"<rect x="0" y="0" width="{}" height="{}" fill="white"/>"#,
        config.width, config.height
    ));
    if !config.title.is_empty() {
        svg.push_str(&format!(
            r#"<text x="{}" y="28" font-size="16" text-anchor="middle" font-weight="bold">{}</text>"#,
            config.width / 2,
            escape_xml(&config.title)
        ));
    }
    svg
}

fn render_axes(out: &mut String, frame: &Frame, config: &ChartConfig, max: f64) {
    out.push_str(&format!(
        r#"<line x1="{l:.2}" y1="{t:.2}" x2="{l:.2}" y2="{b:.2}" stroke="black"/>"#,
        l = frame.left,
        t = frame.top,
        b = frame.bottom()
    ));
    out.push_str(&format!(
        r#"<line x1="{l:.2}" y1="{b:.2}" x2="{r:.2}" y2="{b:.2}" stroke="black"/>"#,
        l = frame.left,
        b = frame.bottom(),
        r = frame.left + frame.width
    ));

    // Four gridlines with tick labels
    for tick in 0..=4 {
        let value = max * tick as f64 / 4.0;
        let y = frame.y_for(value, max);
        out.push_str(&format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="rgb(220, 220, 220)"/>"#,
            frame.left,
            y,
            frame.left + frame.width,
            y
        ));
        out.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}" font-size="10" text-anchor="end">{:.0}</text>"#,
            frame.left - 6.0,
            y + 3.0,
            value
        ));
    }

    if !config.x_label.is_empty() {
        out.push_str(&format!(
            r#"<text x="{:.2}" y="{}" font-size="12" text-anchor="middle">{}</text>"#,
            frame.left + frame.width / 2.0,
            config.height.saturating_sub(10),
            escape_xml(&config.x_label)
        ));
    }
    if !config.y_label.is_empty() {
        out.push_str(&format!(
            r#"<text x="16" y="{:.2}" font-size="12" text-anchor="middle" transform="rotate(-90 16 {:.2})">{}</text>"#,
            frame.top + frame.height / 2.0,
            frame.top + frame.height / 2.0,
            escape_xml(&config.y_label)
        ));
    }
}

/// X tick label rotated 45 degrees
fn render_x_label(out: &mut String, x: f64, bottom: f64, label: &str) {
    let y = bottom + 14.0;
    out.push_str(&format!(
        r#"<text x="{x:.2}" y="{y:.2}" font-size="10" text-anchor="end" transform="rotate(-45 {x:.2} {y:.2})">{}</text>"#,
        escape_xml(label)
    ));
}

/// Escape the five XML special characters
pub fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(points: &[(&str, f64)]) -> Series {
        let mut s = Series::new("test");
        for (label, value) in points {
            s.push(*label, *value);
        }
        s
    }

    #[test]
    fn test_empty_series_rejected() {
        let empty = Series::new("empty");
        assert_eq!(
            generate_line_chart(&empty, None),
            Err(ChartError::EmptySeries("empty".to_string()))
        );
        assert!(generate_bar_chart(&empty, None).is_err());
        assert!(generate_pie_chart(&empty, None).is_err());
    }

    #[test]
    fn test_bar_chart_value_labels() {
        let svg = generate_bar_chart(&series(&[("A", 12.34), ("B", 5.0)]), None).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(">12.3</text>"));
        assert!(svg.contains(">5.0</text>"));
    }

    #[test]
    fn test_pie_chart_shares() {
        let svg = generate_pie_chart(&series(&[("FinTech", 30.0), ("EdTech", 10.0)]), None).unwrap();
        assert!(svg.contains("FinTech (75.0%)"));
        assert!(svg.contains("EdTech (25.0%)"));
    }

    #[test]
    fn test_pie_chart_single_slice_is_circle() {
        let svg = generate_pie_chart(&series(&[("Only", 4.0)]), None).unwrap();
        assert!(svg.contains("<circle"));
        assert!(svg.contains("Only (100.0%)"));
    }

    #[test]
    fn test_pie_chart_zero_total() {
        let result = generate_pie_chart(&series(&[("A", 0.0)]), None);
        assert_eq!(result, Err(ChartError::NonPositiveTotal("test".to_string())));
    }

    #[test]
    fn test_labels_escaped() {
        let config = ChartConfig::new().with_title("R&D <2020>");
        let svg = generate_line_chart(&series(&[("Q&A", 1.0)]), Some(&config)).unwrap();
        assert!(svg.contains("R&amp;D &lt;2020&gt;"));
        assert!(svg.contains("Q&amp;A"));
        assert!(!svg.contains("Q&A"));
    }
}
