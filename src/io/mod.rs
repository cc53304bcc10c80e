//! Input/output helpers.
//!
//! - survey CSV ingest + validation (`ingest`)
//! - rate table export (CSV) (`export`)
//! - results JSON read/write (`results`)

pub mod export;
pub mod ingest;
pub mod results;

pub use export::*;
pub use ingest::*;
pub use results::*;
