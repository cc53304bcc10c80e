//! Read/write results JSON files.
//!
//! Results JSON is the "portable" representation of an analysis:
//! - run metadata (source file, respondent count, generation time)
//! - the price grid and every rate bucket
//! - the four price points, raw and rounded, with their detection status
//!
//! The schema is defined by `domain::ResultsFile`.

use std::fs::File;
use std::path::Path;

use chrono::Local;

use crate::app::pipeline::RunOutput;
use crate::domain::{PricePointRecord, ResultsFile};
use crate::error::AppError;

/// Assemble the results document for a finished run.
pub fn results_file(output: &RunOutput, source: Option<&Path>) -> ResultsFile {
    ResultsFile {
        tool: "psm".to_string(),
        generated_at: Local::now(),
        source: source.map(|p| p.display().to_string()),
        respondents: output.respondents.len(),
        grid: output.grid,
        buckets: output.buckets.clone(),
        price_points: output.analysis.points().iter().map(PricePointRecord::from).collect(),
    }
}

/// Write a results JSON file.
pub fn write_results_json(path: &Path, output: &RunOutput, source: Option<&Path>) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::failure(format!("Failed to create results JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &results_file(output, source))
        .map_err(|e| AppError::failure(format!("Failed to write results JSON: {e}")))?;

    Ok(())
}

/// Read a results JSON file.
pub fn read_results_json(path: &Path) -> Result<ResultsFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::invalid_input(format!("Failed to open results JSON '{}': {e}", path.display())))?;
    let results: ResultsFile = serde_json::from_reader(file)
        .map_err(|e| AppError::invalid_input(format!("Invalid results JSON: {e}")))?;
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_analysis_on;
    use crate::domain::{Detection, PriceKind, RespondentPrices};

    fn output() -> RunOutput {
        let respondents = vec![
            RespondentPrices::new(50.0, 200.0, 100.0, 150.0),
            RespondentPrices::new(50.0, 200.0, 100.0, 150.0),
            RespondentPrices::new(100.0, 250.0, 150.0, 200.0),
            RespondentPrices::new(100.0, 250.0, 150.0, 200.0),
        ];
        run_analysis_on(respondents, 50.0).unwrap()
    }

    #[test]
    fn written_file_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");

        write_results_json(&path, &output(), Some(Path::new("survey.csv"))).unwrap();
        let results = read_results_json(&path).unwrap();

        assert_eq!(results.tool, "psm");
        assert_eq!(results.source.as_deref(), Some("survey.csv"));
        assert_eq!(results.respondents, 4);
        assert_eq!(results.buckets.len(), 5);
        assert_eq!(results.price_points.len(), 4);

        let highest = &results.price_points[0];
        assert_eq!(highest.kind, PriceKind::Highest);
        assert_eq!(highest.reported, Some(175.0));
        assert_eq!(highest.detection, Detection::Crossed { price: 175.0, lower: 150.0, upper: 200.0 });
    }

    #[test]
    fn detection_status_is_tagged() {
        let json = serde_json::to_value(results_file(&output(), None)).unwrap();
        assert_eq!(json["price_points"][3]["kind"], "min_quality");
        assert_eq!(json["price_points"][3]["detection"]["status"], "crossed");
        assert_eq!(json["grid"]["step"], 50.0);
    }

    #[test]
    fn malformed_json_is_an_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(read_results_json(&path).unwrap_err().exit_code(), 2);
    }
}
