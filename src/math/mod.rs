//! Mathematical utilities: two-line intersection.

pub mod intersect;

pub use intersect::*;
