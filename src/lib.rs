//! `psm-meter` library crate: Van Westendorp Price Sensitivity Meter.
//!
//! The binary (`psm`) is a thin wrapper around this library so that:
//!
//! - the analysis core is testable without spawning processes or touching files
//! - ingest, reporting, and exports stay swappable collaborators
//!
//! Pipeline: `io::ingest` -> `curve` (grid + rates) -> `analysis` (four crossings
//! via `detect`) -> `report` / `plot` / `io` exports.

pub mod analysis;
pub mod app;
pub mod cli;
pub mod curve;
pub mod data;
pub mod detect;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
