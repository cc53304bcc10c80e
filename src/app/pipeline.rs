//! Shared analysis pipeline used by the CLI front-end and tests.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! ingest -> price grid -> rate curves -> four crossings
//!
//! Each stage takes and returns plain data, so the core can run without any I/O
//! (`run_analysis_on`).

use tracing::info;

use crate::analysis::{PriceAnalysis, analyze};
use crate::curve::{build_rate_curve_on, price_grid};
use crate::domain::{AnalysisConfig, PriceGrid, RateBucket, RespondentPrices};
use crate::error::AppError;
use crate::io::ingest::{RowError, load_respondents};

/// All computed outputs of a single analysis run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub respondents: Vec<RespondentPrices>,
    pub rows_read: usize,
    pub row_errors: Vec<RowError>,
    pub grid: PriceGrid,
    pub buckets: Vec<RateBucket>,
    pub analysis: PriceAnalysis,
}

/// Read the configured CSV and run the full analysis.
pub fn run_analysis(config: &AnalysisConfig) -> Result<RunOutput, AppError> {
    let ingest = load_respondents(&config.csv_path, &config.columns, config.nan_policy)?;
    info!(
        rows_read = ingest.rows_read,
        rows_used = ingest.rows_used,
        skipped = ingest.row_errors.len(),
        "survey loaded"
    );

    let mut output = run_analysis_on(ingest.respondents, config.step)?;
    output.rows_read = ingest.rows_read;
    output.row_errors = ingest.row_errors;
    Ok(output)
}

/// Run the analysis on in-memory respondents.
pub fn run_analysis_on(respondents: Vec<RespondentPrices>, step: f64) -> Result<RunOutput, AppError> {
    let grid = price_grid(&respondents, step)?;
    let buckets = build_rate_curve_on(&respondents, &grid)?;
    let analysis = analyze(&buckets);

    Ok(RunOutput {
        rows_read: respondents.len(),
        respondents,
        row_errors: Vec::new(),
        grid,
        buckets,
        analysis,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use crate::domain::{ColumnNames, NanPolicy};

    fn config(path: &std::path::Path) -> AnalysisConfig {
        AnalysisConfig {
            csv_path: path.to_path_buf(),
            step: 50.0,
            nan_policy: NanPolicy::Skip,
            columns: ColumnNames::default(),
            currency: "円".to_string(),
            show_rates: false,
            plot: false,
            plot_width: 60,
            plot_height: 15,
            export_rates: None,
            export_json: None,
        }
    }

    #[test]
    fn csv_to_price_points() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "安すぎる,高すぎる,安い,高い\n50,200,100,150\n50,200,100,150\n100,250,150,200\n100,250,150,200\nx,1,2,3\n"
        )
        .unwrap();

        let output = run_analysis(&config(file.path())).unwrap();
        assert_eq!(output.rows_read, 5);
        assert_eq!(output.respondents.len(), 4);
        assert_eq!(output.row_errors.len(), 1);
        assert_eq!(output.grid, PriceGrid { min: 50.0, max: 250.0, step: 50.0 });
        assert_eq!(output.buckets.len(), 5);

        let reported: Vec<Option<f64>> = output.analysis.points().iter().map(|p| p.reported()).collect();
        assert_eq!(reported, vec![Some(175.0), Some(150.0), Some(150.0), Some(125.0)]);
    }

    #[test]
    fn empty_respondents_fail_before_any_rate() {
        let err = run_analysis_on(Vec::new(), 50.0).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn step_changes_the_grid() {
        let respondents = vec![RespondentPrices::new(120.0, 480.0, 200.0, 350.0)];
        let output = run_analysis_on(respondents, 100.0).unwrap();
        assert_eq!(output.grid, PriceGrid { min: 100.0, max: 500.0, step: 100.0 });
        assert_eq!(output.buckets.len(), 5);
    }
}
