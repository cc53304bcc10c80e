//! Price grid generation.
//!
//! The grid starts at the lowest "too cheap" answer rounded down to a step
//! boundary and ends at the highest "too expensive" answer rounded up. Every
//! candidate price is `min + i * step`, so prices stay exact multiples of the
//! step even for long grids.

use crate::domain::{PriceGrid, RespondentPrices};
use crate::error::AppError;

/// Upper bound on grid prices; wider ranges need a larger step.
pub const MAX_GRID_BUCKETS: usize = 1_000_000;

/// Build the grid for a set of respondents.
///
/// Non-finite answers do not participate in the bounds.
pub fn price_grid(respondents: &[RespondentPrices], step: f64) -> Result<PriceGrid, AppError> {
    if !(step.is_finite() && step > 0.0) {
        return Err(AppError::invalid_input(format!(
            "Invalid price step: {step} (must be finite and > 0)."
        )));
    }
    if respondents.is_empty() {
        return Err(AppError::no_data("No respondents: the price grid needs at least one answer."));
    }

    let lowest = finite_min(respondents.iter().map(|r| r.too_cheap)).ok_or_else(|| {
        AppError::no_data("No finite \"too cheap\" answers: cannot place the lower grid bound.")
    })?;
    let highest = finite_max(respondents.iter().map(|r| r.too_expensive)).ok_or_else(|| {
        AppError::no_data("No finite \"too expensive\" answers: cannot place the upper grid bound.")
    })?;

    let min = (lowest / step).floor() * step;
    let max = (highest / step).ceil() * step;

    if max < min {
        return Err(AppError::no_data(format!(
            "Empty price range: highest \"too expensive\" ({highest}) is below lowest \"too cheap\" ({lowest})."
        )));
    }

    let intervals = (max - min) / step;
    if !(intervals.is_finite() && intervals < MAX_GRID_BUCKETS as f64) {
        return Err(AppError::invalid_input(format!(
            "Price range [{min}, {max}] with step {step} exceeds {MAX_GRID_BUCKETS} grid prices; use a larger --step."
        )));
    }

    Ok(PriceGrid { min, max, step })
}

fn finite_min(values: impl Iterator<Item = f64>) -> Option<f64> {
    values.filter(|v| v.is_finite()).reduce(f64::min)
}

fn finite_max(values: impl Iterator<Item = f64>) -> Option<f64> {
    values.filter(|v| v.is_finite()).reduce(f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn respondent(too_cheap: f64, too_expensive: f64) -> RespondentPrices {
        RespondentPrices::new(too_cheap, too_expensive, too_cheap, too_expensive)
    }

    #[rstest]
    #[case(50.0, 250.0, 50.0, 250.0)]
    #[case(73.0, 201.0, 50.0, 250.0)]
    #[case(99.9, 100.1, 50.0, 150.0)]
    #[case(-20.0, 30.0, -50.0, 50.0)]
    fn bounds_round_outward(#[case] lo: f64, #[case] hi: f64, #[case] min: f64, #[case] max: f64) {
        let grid = price_grid(&[respondent(lo, hi)], 50.0).unwrap();
        assert_eq!(grid.min, min);
        assert_eq!(grid.max, max);
    }

    #[test]
    fn grid_length_matches_range() {
        let respondents = [respondent(120.0, 980.0), respondent(310.0, 1_420.0)];
        let grid = price_grid(&respondents, 50.0).unwrap();
        assert_eq!(grid.min, 100.0);
        assert_eq!(grid.max, 1_450.0);
        assert_eq!(grid.len(), ((grid.max - grid.min) / 50.0) as usize + 1);

        let prices: Vec<f64> = grid.prices().collect();
        assert_eq!(prices.first(), Some(&100.0));
        assert_eq!(prices.last(), Some(&1_450.0));
        assert!(prices.windows(2).all(|w| w[1] - w[0] == 50.0));
    }

    #[test]
    fn bounds_ignore_nan_answers() {
        let respondents = [respondent(f64::NAN, 300.0), respondent(120.0, f64::NAN)];
        let grid = price_grid(&respondents, 50.0).unwrap();
        assert_eq!((grid.min, grid.max), (100.0, 300.0));
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = price_grid(&[], 50.0).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn invalid_step_is_rejected() {
        let err = price_grid(&[respondent(50.0, 100.0)], 0.0).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(price_grid(&[respondent(50.0, 100.0)], f64::NAN).is_err());
    }

    #[test]
    fn huge_finite_answer_is_rejected() {
        let err = price_grid(&[RespondentPrices::new(10.0, 1e300, 20.0, 30.0)], 50.0).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.message().contains("--step"));
    }

    #[test]
    fn grid_at_the_bucket_cap() {
        let top = (MAX_GRID_BUCKETS as f64 - 1.0) * 50.0;
        let grid = price_grid(&[respondent(0.0, top)], 50.0).unwrap();
        assert_eq!(grid.len(), MAX_GRID_BUCKETS);

        let err = price_grid(&[respondent(0.0, top + 50.0)], 50.0).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = price_grid(&[respondent(500.0, 100.0)], 50.0).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
