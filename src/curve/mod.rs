//! Rate-curve construction.
//!
//! - price grid spanning the observed answers (`grid`)
//! - cumulative response rates per grid price (`rates`)

pub mod grid;
pub mod rates;

pub use grid::*;
pub use rates::*;
