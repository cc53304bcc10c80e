//! First-crossing detection between two rate curves.
//!
//! The scan walks consecutive bucket pairs `(prev, curr)` from the start of the
//! grid and stops at the first pair where the requested transition holds. Later
//! crossings are never examined. The crossing price is the intersection of the
//! two linear segments spanning `[prev.price, curr.price]`.

use tracing::{debug, warn};

use crate::domain::{Detection, RateBucket, RateKind, Transition};
use crate::math::{Point, line_intersection_x};

/// Find the first crossing of `lhs` against `rhs`.
pub fn find_crossing(buckets: &[RateBucket], transition: Transition, lhs: RateKind, rhs: RateKind) -> Detection {
    match first_transition(buckets, transition, lhs, rhs) {
        Some((prev, curr)) => crossing_on(prev, curr, lhs, rhs),
        None => Detection::NoTransition,
    }
}

/// Intersect the `lhs` and `rhs` segments spanning `[prev.price, curr.price]`.
///
/// With finite rates a detected transition always yields segments of different
/// slopes; parallel segments still map to `Detection::Parallel` instead of an error.
pub fn crossing_on(prev: &RateBucket, curr: &RateBucket, lhs: RateKind, rhs: RateKind) -> Detection {
    let (lower, upper) = (prev.price, curr.price);
    let x = line_intersection_x(
        Point::new(lower, prev.rate(lhs)),
        Point::new(upper, curr.rate(lhs)),
        Point::new(lower, prev.rate(rhs)),
        Point::new(upper, curr.rate(rhs)),
    );

    match x {
        Some(price) => {
            if !(lower..=upper).contains(&price) {
                warn!(
                    price,
                    lower,
                    upper,
                    lhs = lhs.display_name(),
                    rhs = rhs.display_name(),
                    "crossing lies outside its grid interval"
                );
            }
            debug!(price, lower, upper, lhs = lhs.display_name(), rhs = rhs.display_name(), "crossing found");
            Detection::Crossed { price, lower, upper }
        }
        None => {
            debug!(lower, upper, lhs = lhs.display_name(), rhs = rhs.display_name(), "parallel segments");
            Detection::Parallel { lower, upper }
        }
    }
}

/// First consecutive pair where `transition` holds between `lhs` and `rhs`.
pub fn first_transition(
    buckets: &[RateBucket],
    transition: Transition,
    lhs: RateKind,
    rhs: RateKind,
) -> Option<(&RateBucket, &RateBucket)> {
    buckets
        .windows(2)
        .map(|pair| (&pair[0], &pair[1]))
        .find(|(prev, curr)| {
            transition.holds(
                (prev.rate(lhs), prev.rate(rhs)),
                (curr.rate(lhs), curr.rate(rhs)),
            )
        })
}
