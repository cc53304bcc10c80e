//! Cumulative response rates over the price grid.
//!
//! For each grid price `p` we count the share of respondents whose answer
//! satisfies a fixed comparison against `p`:
//!
//! ```text
//! too expensive: answer <= p      expensive: answer <= p
//! too cheap:     answer >= p      cheap:     answer >= p
//! ```
//!
//! Shares are percentages rounded to one decimal place. NaN answers never
//! satisfy a comparison, so such respondents only count in the denominator.

use rayon::prelude::*;
use tracing::debug;

use crate::curve::grid::price_grid;
use crate::domain::{PriceGrid, RateBucket, RespondentPrices};
use crate::error::AppError;

/// Percentage of respondents matching `pred`, rounded to one decimal.
///
/// `respondents` must be non-empty.
pub fn response_rate(respondents: &[RespondentPrices], pred: impl Fn(&RespondentPrices) -> bool) -> f64 {
    let hits = respondents.iter().filter(|r| pred(r)).count();
    (hits as f64 / respondents.len() as f64 * 100.0 * 10.0).round() / 10.0
}

/// Rates for a single grid price.
pub fn rate_bucket(respondents: &[RespondentPrices], price: f64) -> RateBucket {
    RateBucket {
        price,
        too_expensive_rate: response_rate(respondents, |r| r.too_expensive <= price),
        too_cheap_rate: response_rate(respondents, |r| r.too_cheap >= price),
        expensive_rate: response_rate(respondents, |r| r.expensive <= price),
        cheap_rate: response_rate(respondents, |r| r.cheap >= price),
    }
}

/// Build the grid from the answers and compute one bucket per grid price.
pub fn build_rate_curve(respondents: &[RespondentPrices], step: f64) -> Result<Vec<RateBucket>, AppError> {
    let grid = price_grid(respondents, step)?;
    build_rate_curve_on(respondents, &grid)
}

/// Compute one bucket per price of an existing grid, in grid order.
pub fn build_rate_curve_on(respondents: &[RespondentPrices], grid: &PriceGrid) -> Result<Vec<RateBucket>, AppError> {
    if respondents.is_empty() {
        return Err(AppError::no_data("No respondents: cannot compute response rates."));
    }

    // Buckets are independent; the indexed collect keeps grid order.
    let buckets: Vec<RateBucket> = (0..grid.len())
        .into_par_iter()
        .map(|i| rate_bucket(respondents, grid.price_at(i)))
        .collect();

    debug!(
        buckets = buckets.len(),
        respondents = respondents.len(),
        min = grid.min,
        max = grid.max,
        "built rate curves"
    );
    Ok(buckets)
}
