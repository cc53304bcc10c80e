//! Two-line intersection in cross-product form.
//!
//! Each line is given by two points. Writing line A as `p + t·r` and line B as
//! `q + u·s`, the lines meet where
//!
//! ```text
//! t = ((q - p) × s) / (r × s)
//! ```
//!
//! with `×` the 2D cross product. `r × s = 0` means the lines are parallel
//! (or coincide) and there is no single intersection point.
//!
//! The result is not restricted to the segments between the given points.

use nalgebra::Vector2;

/// A point in `(price, rate)` space.
pub type Point = Vector2<f64>;

/// x-coordinate where the line through `a1, a2` meets the line through `b1, b2`.
///
/// Returns `None` for parallel/coincident lines or a non-finite result.
pub fn line_intersection_x(a1: Point, a2: Point, b1: Point, b2: Point) -> Option<f64> {
    let r = a2 - a1;
    let s = b2 - b1;

    let denominator = r.perp(&s);
    if denominator == 0.0 {
        return None;
    }

    let t = (b1 - a1).perp(&s) / denominator;
    let x = a1.x + t * r.x;
    x.is_finite().then_some(x)
}
