//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the analysis code stays clean and testable
//! - output changes are localized (golden tests below)

use crate::analysis::PriceAnalysis;
use crate::app::pipeline::RunOutput;
use crate::domain::{AnalysisConfig, PricePoint, RateBucket};
use crate::io::ingest::RowError;

const RULE: &str = "------------------------";

/// Row errors listed in the summary before truncating.
const MAX_LISTED_ROW_ERRORS: usize = 10;

/// Format the run summary (dataset stats + grid).
pub fn format_run_summary(output: &RunOutput, config: &AnalysisConfig) -> String {
    let mut out = String::new();

    out.push_str("=== psm - Van Westendorp Price Sensitivity Meter ===\n");
    out.push_str(&format!("Input: {}\n", config.csv_path.display()));
    out.push_str(&format!(
        "Rows: read={} | used={} | skipped/flagged={}\n",
        output.rows_read,
        output.respondents.len(),
        output.row_errors.len()
    ));
    out.push_str(&format!(
        "Grid: [{}, {}] step={} | buckets={}\n",
        fmt_price(output.grid.min),
        fmt_price(output.grid.max),
        fmt_price(output.grid.step),
        output.buckets.len()
    ));
    out.push_str(&format_row_errors(&output.row_errors));

    out
}

fn format_row_errors(errors: &[RowError]) -> String {
    let mut out = String::new();
    for e in errors.iter().take(MAX_LISTED_ROW_ERRORS) {
        out.push_str(&format!("  line {}: {}\n", e.line, e.message));
    }
    if errors.len() > MAX_LISTED_ROW_ERRORS {
        out.push_str(&format!("  ... and {} more\n", errors.len() - MAX_LISTED_ROW_ERRORS));
    }
    out
}

/// Format the four price points.
///
/// Missing points print as `not found (...)`, never as zero.
pub fn format_price_points(analysis: &PriceAnalysis, currency: &str) -> String {
    let points = analysis.points();
    let label_width = points
        .iter()
        .map(|p| p.kind.display_name().chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(RULE);
    out.push('\n');
    for point in &points {
        out.push_str(&format!(
            "{:<label_width$} : {}\n",
            point.kind.display_name(),
            fmt_point(point, currency)
        ));
    }
    out.push_str(RULE);
    out.push('\n');
    out
}

fn fmt_point(point: &PricePoint, currency: &str) -> String {
    match point.reported() {
        Some(v) if currency.is_empty() => fmt_price(v),
        Some(v) => format!("{} {currency}", fmt_price(v)),
        None => format!("not found ({})", point.detection.reason()),
    }
}

/// Format every bucket as an aligned table.
pub fn format_rate_table(buckets: &[RateBucket]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>10} {:>14} {:>10} {:>10} {:>10}\n",
        "price", "too_expensive", "too_cheap", "expensive", "cheap"
    ));
    out.push_str(&format!(
        "{:->10} {:->14} {:->10} {:->10} {:->10}\n",
        "", "", "", "", ""
    ));
    for b in buckets {
        out.push_str(&format!(
            "{:>10} {:>14.1} {:>10.1} {:>10.1} {:>10.1}\n",
            fmt_price(b.price),
            b.too_expensive_rate,
            b.too_cheap_rate,
            b.expensive_rate,
            b.cheap_rate
        ));
    }
    out
}

/// Whole prices without a fractional part, otherwise two decimals.
fn fmt_price(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}
