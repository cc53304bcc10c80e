//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - survey input records (`RespondentPrices`) and ingest configuration (`ColumnNames`, `NanPolicy`)
//! - the rate curves (`PriceGrid`, `RateBucket`, `RateKind`)
//! - crossing outputs (`PriceKind`, `Detection`, `PricePoint`)
//! - the portable results document (`ResultsFile`)

pub mod types;

pub use types::*;
