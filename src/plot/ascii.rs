//! ASCII plotting of the four rate curves.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - one line per curve, drawn with its `RateKind::marker`
//! - crossings: `*`

use crate::analysis::PriceAnalysis;
use crate::domain::{PriceKind, RateBucket, RateKind, ResultsFile};

const RATE_MIN: f64 = 0.0;
const RATE_MAX: f64 = 100.0;

/// Render a plot for an in-memory analysis.
pub fn render_ascii_plot(buckets: &[RateBucket], analysis: &PriceAnalysis, width: usize, height: usize) -> String {
    let crossings: Vec<(PriceKind, f64)> = analysis
        .points()
        .iter()
        .filter_map(|p| p.raw().map(|price| (p.kind, price)))
        .collect();
    render_plot(buckets, &crossings, width, height)
}

/// Render a plot from a saved results file.
pub fn render_ascii_plot_from_results(results: &ResultsFile, width: usize, height: usize) -> String {
    let crossings: Vec<(PriceKind, f64)> = results
        .price_points
        .iter()
        .filter_map(|p| p.raw.map(|price| (p.kind, price)))
        .collect();
    render_plot(&results.buckets, &crossings, width, height)
}

fn render_plot(buckets: &[RateBucket], crossings: &[(PriceKind, f64)], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let Some((p_min, p_max)) = price_range(buckets) else {
        return "Plot: need at least two grid prices\n".to_string();
    };

    let mut grid = vec![vec![' '; width]; height];

    // Earlier curves win where lines overlap.
    for kind in RateKind::ALL {
        let curve: Vec<(f64, f64)> = buckets.iter().map(|b| (b.price, b.rate(kind))).collect();
        draw_curve(&mut grid, &curve, p_min, p_max, kind.marker());
    }

    for &(kind, price) in crossings {
        let (lhs, _) = kind.lines();
        if let Some(rate) = rate_at(buckets, lhs, price) {
            let x = map_x(price, p_min, p_max, width);
            let y = map_y(rate, height);
            grid[y][x] = '*';
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: price=[{p_min:.0}, {p_max:.0}] | rate=[{RATE_MIN:.0}, {RATE_MAX:.0}]%\n"
    ));
    let legend: Vec<String> = RateKind::ALL
        .iter()
        .map(|k| format!("{} {}", k.marker(), k.display_name()))
        .collect();
    out.push_str(&format!("{} | * crossing\n", legend.join(", ")));

    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }

    out
}

fn price_range(buckets: &[RateBucket]) -> Option<(f64, f64)> {
    let min_p = buckets.iter().map(|b| b.price).fold(f64::INFINITY, f64::min);
    let max_p = buckets.iter().map(|b| b.price).fold(f64::NEG_INFINITY, f64::max);
    if min_p.is_finite() && max_p.is_finite() && max_p > min_p {
        Some((min_p, max_p))
    } else {
        None
    }
}

/// Linear interpolation of one curve between the buckets bracketing `price`.
fn rate_at(buckets: &[RateBucket], kind: RateKind, price: f64) -> Option<f64> {
    buckets.windows(2).find_map(|w| {
        let (b0, b1) = (&w[0], &w[1]);
        if b0.price <= price && price <= b1.price {
            let u = (price - b0.price) / (b1.price - b0.price);
            Some(b0.rate(kind) + u * (b1.rate(kind) - b0.rate(kind)))
        } else {
            None
        }
    })
}

fn map_x(p: f64, p_min: f64, p_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((p - p_min) / (p_max - p_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(rate: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((rate - RATE_MIN) / (RATE_MAX - RATE_MIN)).clamp(0.0, 1.0);
    // rate=100 is row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], p_min: f64, p_max: f64, ch: char) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(p, rate) in curve {
        if !rate.is_finite() {
            prev = None;
            continue;
        }
        let x = map_x(p, p_min, p_max, width);
        let y = map_y(rate, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, x, y, ch);
        } else if grid[y][x] == ' ' {
            grid[y][x] = ch;
        }
        prev = Some((x, y));
    }
}

/// Integer line drawing (Bresenham-ish). Only fills empty cells.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
