//! Synthetic survey generation.
//!
//! Each respondent gets a log-normally distributed reference price. The four
//! answers are drawn as multiples of it from disjoint bands, so every synthetic
//! respondent satisfies `too cheap <= cheap <= expensive <= too expensive`.

use std::path::Path;

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{ColumnNames, RespondentPrices};
use crate::error::AppError;

const TOO_CHEAP_BAND: (f64, f64) = (0.40, 0.65);
const CHEAP_BAND: (f64, f64) = (0.70, 0.95);
const EXPENSIVE_BAND: (f64, f64) = (1.05, 1.35);
const TOO_EXPENSIVE_BAND: (f64, f64) = (1.45, 2.00);

/// Settings for a synthetic survey.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleConfig {
    pub count: usize,
    pub seed: u64,
    /// Median reference price.
    pub center: f64,
    /// Standard deviation of the log reference price.
    pub spread: f64,
}

/// Generate `config.count` respondents. Deterministic for a given seed.
pub fn generate_sample(config: &SampleConfig) -> Result<Vec<RespondentPrices>, AppError> {
    if config.count == 0 {
        return Err(AppError::invalid_input("Sample count must be > 0."));
    }
    if !(config.center.is_finite() && config.center > 0.0) {
        return Err(AppError::invalid_input("Sample center price must be finite and > 0."));
    }
    if !(config.spread.is_finite() && config.spread >= 0.0) {
        return Err(AppError::invalid_input(format!(
            "Invalid sample spread {}: must be finite and >= 0.",
            config.spread
        )));
    }
    let normal = Normal::new(0.0, config.spread)
        .map_err(|e| AppError::invalid_input(format!("Invalid sample spread {}: {e}", config.spread)))?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut out = Vec::with_capacity(config.count);

    for _ in 0..config.count {
        let reference = config.center * normal.sample(&mut rng).exp();
        let mut answer = |(lo, hi): (f64, f64)| (reference * rng.gen_range(lo..hi)).round();

        out.push(RespondentPrices {
            too_cheap: answer(TOO_CHEAP_BAND),
            cheap: answer(CHEAP_BAND),
            expensive: answer(EXPENSIVE_BAND),
            too_expensive: answer(TOO_EXPENSIVE_BAND),
        });
    }

    Ok(out)
}

/// Write respondents as a survey CSV using `columns` as the header row.
pub fn write_sample_csv(path: &Path, respondents: &[RespondentPrices], columns: &ColumnNames) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::failure(format!("Failed to create sample CSV '{}': {e}", path.display())))?;

    writer
        .write_record([&columns.too_cheap, &columns.too_expensive, &columns.cheap, &columns.expensive])
        .map_err(|e| AppError::failure(format!("Failed to write sample CSV header: {e}")))?;

    for r in respondents {
        writer
            .write_record([
                r.too_cheap.to_string(),
                r.too_expensive.to_string(),
                r.cheap.to_string(),
                r.expensive.to_string(),
            ])
            .map_err(|e| AppError::failure(format!("Failed to write sample CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::failure(format!("Failed to flush sample CSV: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NanPolicy;
    use crate::io::ingest::load_respondents;

    fn config(seed: u64) -> SampleConfig {
        SampleConfig { count: 200, seed, center: 1_000.0, spread: 0.25 }
    }

    #[test]
    fn answers_are_ordered() {
        for r in generate_sample(&config(7)).unwrap() {
            assert!(r.too_cheap <= r.cheap, "{r:?}");
            assert!(r.cheap <= r.expensive, "{r:?}");
            assert!(r.expensive <= r.too_expensive, "{r:?}");
            assert!(r.too_cheap > 0.0);
        }
    }

    #[test]
    fn same_seed_same_sample() {
        assert_eq!(generate_sample(&config(42)).unwrap(), generate_sample(&config(42)).unwrap());
        assert_ne!(generate_sample(&config(42)).unwrap(), generate_sample(&config(43)).unwrap());
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let zero = SampleConfig { count: 0, ..config(1) };
        assert_eq!(generate_sample(&zero).unwrap_err().exit_code(), 2);

        let negative_spread = SampleConfig { spread: -1.0, ..config(1) };
        assert_eq!(generate_sample(&negative_spread).unwrap_err().exit_code(), 2);

        let nan_spread = SampleConfig { spread: f64::NAN, ..config(1) };
        assert_eq!(generate_sample(&nan_spread).unwrap_err().exit_code(), 2);

        let flat = SampleConfig { spread: 0.0, ..config(1) };
        assert!(generate_sample(&flat).is_ok());

        let bad_center = SampleConfig { center: 0.0, ..config(1) };
        assert!(generate_sample(&bad_center).is_err());
    }

    #[test]
    fn written_sample_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.csv");
        let sample = generate_sample(&SampleConfig { count: 25, ..config(3) }).unwrap();

        write_sample_csv(&path, &sample, &ColumnNames::default()).unwrap();
        let data = load_respondents(&path, &ColumnNames::default(), NanPolicy::Reject).unwrap();

        assert_eq!(data.respondents, sample);
    }
}
