//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during the analysis
//! - exported to JSON/CSV
//! - reloaded later for plotting

use std::path::PathBuf;

use chrono::{DateTime, Local};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Default spacing between candidate prices on the grid (currency units).
pub const DEFAULT_PRICE_STEP: f64 = 50.0;

/// Distance from a whole price below which a crossing counts as exactly whole.
pub const WHOLE_PRICE_TOLERANCE: f64 = 1e-9;

/// One respondent's four price answers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RespondentPrices {
    pub too_cheap: f64,
    pub too_expensive: f64,
    pub cheap: f64,
    pub expensive: f64,
}

impl RespondentPrices {
    /// Argument order follows the survey tuple `(too cheap, too expensive, cheap, expensive)`.
    pub fn new(too_cheap: f64, too_expensive: f64, cheap: f64, expensive: f64) -> Self {
        Self {
            too_cheap,
            too_expensive,
            cheap,
            expensive,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.too_cheap.is_finite()
            && self.too_expensive.is_finite()
            && self.cheap.is_finite()
            && self.expensive.is_finite()
    }
}

/// The four cumulative response-rate curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateKind {
    /// Share answering "too expensive" at or below the price.
    TooExpensive,
    /// Share answering "too cheap" at or above the price.
    TooCheap,
    /// Share answering "expensive" at or below the price.
    Expensive,
    /// Share answering "cheap" at or above the price.
    Cheap,
}

impl RateKind {
    pub const ALL: [RateKind; 4] = [
        RateKind::TooExpensive,
        RateKind::TooCheap,
        RateKind::Expensive,
        RateKind::Cheap,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            RateKind::TooExpensive => "too expensive",
            RateKind::TooCheap => "too cheap",
            RateKind::Expensive => "expensive",
            RateKind::Cheap => "cheap",
        }
    }

    /// Single-character marker used by the terminal plot.
    pub fn marker(self) -> char {
        match self {
            RateKind::TooExpensive => 'X',
            RateKind::TooCheap => 'c',
            RateKind::Expensive => 'x',
            RateKind::Cheap => 'C',
        }
    }
}

/// Rates at one grid price, as percentages rounded to one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateBucket {
    pub price: f64,
    pub too_expensive_rate: f64,
    pub too_cheap_rate: f64,
    pub expensive_rate: f64,
    pub cheap_rate: f64,
}

impl RateBucket {
    pub fn rate(&self, kind: RateKind) -> f64 {
        match kind {
            RateKind::TooExpensive => self.too_expensive_rate,
            RateKind::TooCheap => self.too_cheap_rate,
            RateKind::Expensive => self.expensive_rate,
            RateKind::Cheap => self.cheap_rate,
        }
    }
}

/// Fixed-step price grid `min, min + step, ..., max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceGrid {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl PriceGrid {
    /// Number of grid prices (both endpoints included).
    ///
    /// Grids from `curve::price_grid` stay below `curve::MAX_GRID_BUCKETS`.
    pub fn len(&self) -> usize {
        (((self.max - self.min) / self.step).round() as usize).saturating_add(1)
    }

    /// Price at index `i`, computed from `min` to avoid accumulated drift.
    pub fn price_at(&self, i: usize) -> f64 {
        self.min + self.step * i as f64
    }

    pub fn prices(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(|i| self.price_at(i))
    }
}

/// Sign-change condition between two curves `a` and `b` across one grid interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// `a < b` at the lower price and `a >= b` at the upper price.
    Rising,
    /// `a > b` at the lower price and `a <= b` at the upper price.
    Falling,
}

impl Transition {
    pub fn holds(self, prev: (f64, f64), curr: (f64, f64)) -> bool {
        match self {
            Transition::Rising => prev.0 < prev.1 && curr.0 >= curr.1,
            Transition::Falling => prev.0 > prev.1 && curr.0 <= curr.1,
        }
    }
}

/// The four Van Westendorp price points.
///
/// Each variant fixes which pair of curves is compared and which transition
/// marks their crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceKind {
    /// Too expensive rising through cheap.
    Highest,
    /// Cheap falling through expensive.
    Compromise,
    /// Too expensive rising through too cheap.
    Ideal,
    /// Too cheap falling through expensive.
    MinQuality,
}

impl PriceKind {
    pub const ALL: [PriceKind; 4] = [
        PriceKind::Highest,
        PriceKind::Compromise,
        PriceKind::Ideal,
        PriceKind::MinQuality,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            PriceKind::Highest => "Highest acceptable price",
            PriceKind::Compromise => "Compromise price",
            PriceKind::Ideal => "Ideal price",
            PriceKind::MinQuality => "Minimum quality price",
        }
    }

    /// `(lhs, rhs)` curves whose crossing defines this price point.
    pub fn lines(self) -> (RateKind, RateKind) {
        match self {
            PriceKind::Highest => (RateKind::TooExpensive, RateKind::Cheap),
            PriceKind::Compromise => (RateKind::Cheap, RateKind::Expensive),
            PriceKind::Ideal => (RateKind::TooExpensive, RateKind::TooCheap),
            PriceKind::MinQuality => (RateKind::TooCheap, RateKind::Expensive),
        }
    }

    pub fn transition(self) -> Transition {
        match self {
            PriceKind::Highest | PriceKind::Ideal => Transition::Rising,
            PriceKind::Compromise | PriceKind::MinQuality => Transition::Falling,
        }
    }
}

/// Outcome of scanning a pair of curves for their first crossing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Detection {
    /// The curves cross at `price`; the transition was seen on `[lower, upper]`.
    Crossed { price: f64, lower: f64, upper: f64 },
    /// No grid interval satisfies the transition.
    NoTransition,
    /// A transition was seen on `[lower, upper]` but the two segments are parallel.
    Parallel { lower: f64, upper: f64 },
}

impl Detection {
    pub fn price(&self) -> Option<f64> {
        match self {
            Detection::Crossed { price, .. } => Some(*price),
            Detection::NoTransition | Detection::Parallel { .. } => None,
        }
    }

    /// Short human-readable reason for a missing price.
    pub fn reason(&self) -> &'static str {
        match self {
            Detection::Crossed { .. } => "found",
            Detection::NoTransition => "curves never cross",
            Detection::Parallel { .. } => "parallel segments",
        }
    }
}

/// One named result of the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub kind: PriceKind,
    pub detection: Detection,
}

impl PricePoint {
    /// Unrounded crossing price, if any.
    pub fn raw(&self) -> Option<f64> {
        self.detection.price()
    }

    /// Crossing price rounded up to the next whole currency unit.
    ///
    /// Values within `WHOLE_PRICE_TOLERANCE` of an integer are taken as that
    /// integer first, so intersection round-off does not add a unit.
    pub fn reported(&self) -> Option<f64> {
        self.raw().map(|price| {
            let nearest = price.round();
            if (price - nearest).abs() <= WHOLE_PRICE_TOLERANCE {
                nearest
            } else {
                price.ceil()
            }
        })
    }
}

/// How ingest treats price fields that do not parse to a finite number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NanPolicy {
    /// Drop the row and record a row error.
    #[default]
    Skip,
    /// Abort ingest on the first bad row.
    Reject,
    /// Keep the row with NaN fields (counted in every denominator, never in a numerator).
    Keep,
}

/// CSV header names for the four survey questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnNames {
    pub too_cheap: String,
    pub too_expensive: String,
    pub cheap: String,
    pub expensive: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            too_cheap: "安すぎる".to_string(),
            too_expensive: "高すぎる".to_string(),
            cheap: "安い".to_string(),
            expensive: "高い".to_string(),
        }
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus `.env` and defaults).
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub csv_path: PathBuf,
    pub step: f64,
    pub nan_policy: NanPolicy,
    pub columns: ColumnNames,

    /// Label printed after each price.
    pub currency: String,
    pub show_rates: bool,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_rates: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

/// Serialized form of one price point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePointRecord {
    pub kind: PriceKind,
    pub raw: Option<f64>,
    pub reported: Option<f64>,
    pub detection: Detection,
}

impl From<&PricePoint> for PricePointRecord {
    fn from(point: &PricePoint) -> Self {
        Self {
            kind: point.kind,
            raw: point.raw(),
            reported: point.reported(),
            detection: point.detection,
        }
    }
}

/// A saved analysis (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsFile {
    pub tool: String,
    pub generated_at: DateTime<Local>,
    pub source: Option<String>,
    pub respondents: usize,
    pub grid: PriceGrid,
    pub buckets: Vec<RateBucket>,
    pub price_points: Vec<PricePointRecord>,
}
