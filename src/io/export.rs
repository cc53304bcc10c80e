//! Export the rate buckets to CSV.
//!
//! One row per grid price, easy to chart in a spreadsheet.

use std::path::Path;

use crate::domain::RateBucket;
use crate::error::AppError;

/// Write the rate buckets to a CSV file.
pub fn write_rates_csv(path: &Path, buckets: &[RateBucket]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::failure(format!("Failed to create rates CSV '{}': {e}", path.display())))?;

    for bucket in buckets {
        writer
            .serialize(bucket)
            .map_err(|e| AppError::failure(format!("Failed to write rates CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::failure(format!("Failed to flush rates CSV: {e}")))?;
    Ok(())
}
