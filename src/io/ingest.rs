//! CSV ingest and validation.
//!
//! This module turns a survey export into `RespondentPrices` records:
//!
//! - **Strict schema**: all four question columns must be present (exit code 2)
//! - **Row-level validation** governed by `NanPolicy` (skip, reject, or keep as NaN)
//! - **No analysis logic here**

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::{debug, warn};

use crate::domain::{ColumnNames, NanPolicy, RespondentPrices};
use crate::error::AppError;

/// A row-level problem encountered during ingest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Column indices resolved from the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndices {
    pub too_cheap: usize,
    pub too_expensive: usize,
    pub cheap: usize,
    pub expensive: usize,
}

/// Ingest output: respondents + row errors + counters.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub respondents: Vec<RespondentPrices>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
    pub columns: ColumnIndices,
}

/// Open and read a survey CSV.
pub fn load_respondents(path: &Path, columns: &ColumnNames, policy: NanPolicy) -> Result<IngestedData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::invalid_input(format!("Failed to open CSV '{}': {e}", path.display())))?;
    debug!(path = %path.display(), ?policy, "reading survey CSV");
    read_respondents(file, columns, policy)
}

/// Read survey rows from any CSV source.
pub fn read_respondents<R: Read>(
    source: R,
    columns: &ColumnNames,
    policy: NanPolicy,
) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| AppError::invalid_input(format!("Failed to read CSV headers: {e}")))?
        .clone();
    let indices = resolve_columns(&build_header_map(&headers), columns)?;

    let mut respondents = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // Header is line 1.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                let message = format!("CSV parse error: {e}");
                if policy == NanPolicy::Reject {
                    return Err(AppError::invalid_input(format!("Line {line}: {message}")));
                }
                warn!(line, %message, "skipping row");
                row_errors.push(RowError { line, message });
                continue;
            }
        };

        match parse_row(&record, indices) {
            Ok(prices) => respondents.push(prices),
            Err((partial, message)) => match policy {
                NanPolicy::Reject => {
                    return Err(AppError::invalid_input(format!("Line {line}: {message}")));
                }
                NanPolicy::Skip => {
                    warn!(line, %message, "skipping row");
                    row_errors.push(RowError { line, message });
                }
                NanPolicy::Keep => {
                    warn!(line, %message, "keeping row with NaN answers");
                    row_errors.push(RowError {
                        line,
                        message: format!("{message} (kept as NaN)"),
                    });
                    respondents.push(partial);
                }
            },
        }
    }

    let rows_used = respondents.len();
    if rows_used == 0 {
        return Err(AppError::no_data("CSV contains no usable survey rows."));
    }

    debug!(rows_read, rows_used, skipped = row_errors.len(), "ingest complete");
    Ok(IngestedData {
        respondents,
        row_errors,
        rows_read,
        rows_used,
        columns: indices,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_lowercase()
}

fn resolve_columns(header_map: &HashMap<String, usize>, columns: &ColumnNames) -> Result<ColumnIndices, AppError> {
    // English names are always accepted as a fallback.
    Ok(ColumnIndices {
        too_cheap: find_column(header_map, &columns.too_cheap, "too_cheap")?,
        too_expensive: find_column(header_map, &columns.too_expensive, "too_expensive")?,
        cheap: find_column(header_map, &columns.cheap, "cheap")?,
        expensive: find_column(header_map, &columns.expensive, "expensive")?,
    })
}

fn find_column(header_map: &HashMap<String, usize>, name: &str, alias: &str) -> Result<usize, AppError> {
    header_map
        .get(&normalize_header_name(name))
        .or_else(|| header_map.get(alias))
        .copied()
        .ok_or_else(|| AppError::invalid_input(format!("Missing required column: `{name}` (or `{alias}`)")))
}

/// Parse the four answers. On failure, returns the row with NaN in every bad
/// field together with a description of what went wrong.
fn parse_row(record: &StringRecord, idx: ColumnIndices) -> Result<RespondentPrices, (RespondentPrices, String)> {
    let mut problems = Vec::new();
    let mut field = |i: usize, label: &str| match parse_price(record.get(i)) {
        Some(v) => v,
        None => {
            problems.push(format!("`{label}`={:?}", record.get(i).unwrap_or("")));
            f64::NAN
        }
    };

    let prices = RespondentPrices {
        too_cheap: field(idx.too_cheap, "too cheap"),
        too_expensive: field(idx.too_expensive, "too expensive"),
        cheap: field(idx.cheap, "cheap"),
        expensive: field(idx.expensive, "expensive"),
    };

    if problems.is_empty() {
        Ok(prices)
    } else {
        Err((prices, format!("Invalid price value(s): {}", problems.join(", "))))
    }
}

fn parse_price(s: Option<&str>) -> Option<f64> {
    let v = s?.trim().parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}
