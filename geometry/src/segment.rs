//! Segment primitives: orientation, line deviation, collinearity.
//!
//! Coordinates are treated as a plane with longitude on the x axis and
//! latitude on the y axis. Heights are ignored.

use crate::tolerance::Tolerance;
use parcel_types::Point;

/// Cross product of `(a - o) x (b - o)`.
///
/// Positive when `o -> a -> b` turns counter-clockwise. Coordinates fit in
/// 48 bits, so the product always fits in `i128`.
pub(crate) fn cross(o: &Point, a: &Point, b: &Point) -> i128 {
    let (ox, oy) = (o.lon() as i128, o.lat() as i128);
    let (ax, ay) = (a.lon() as i128 - ox, a.lat() as i128 - oy);
    let (bx, by) = (b.lon() as i128 - ox, b.lat() as i128 - oy);
    ax * by - ay * bx
}

/// Sign of [`cross`]: -1, 0 or 1.
pub(crate) fn orientation(o: &Point, a: &Point, b: &Point) -> i8 {
    cross(o, a, b).signum() as i8
}

fn same_position(a: &Point, b: &Point) -> bool {
    a.lat() == b.lat() && a.lon() == b.lon()
}

fn chebyshev(a: &Point, b: &Point) -> i128 {
    let dx = (a.lon() as i128 - b.lon() as i128).abs();
    let dy = (a.lat() as i128 - b.lat() as i128).abs();
    dx.max(dy)
}

/// Whether `p` lies within `tol` of the infinite line through `a` and `b`.
///
/// Distance is estimated as `|cross| / max(|dx|, |dy|)`, which is never
/// smaller than the true distance and at most sqrt(2) times it. A degenerate
/// line (a == b) degrades to the distance from `p` to `a`.
pub(crate) fn near_line(p: &Point, a: &Point, b: &Point, tol: Tolerance) -> bool {
    let t = tol.units() as i128;
    if same_position(a, b) {
        return chebyshev(p, a) <= t;
    }
    cross(a, b, p).abs() <= t * chebyshev(a, b)
}

/// Whether `p` lies within `tol` of the closed segment `a..b`.
pub(crate) fn near_segment(p: &Point, a: &Point, b: &Point, tol: Tolerance) -> bool {
    let t = tol.units();
    let within = |v: i64, lo: i64, hi: i64| v >= lo.min(hi) - t && v <= lo.max(hi) + t;
    within(p.lon(), a.lon(), b.lon())
        && within(p.lat(), a.lat(), b.lat())
        && near_line(p, a, b, tol)
}

/// Whether segments `a1..a2` and `b1..b2` lie on one line, using the
/// tolerance of the coarsest of the four endpoints.
pub fn segments_are_collinear(a1: &Point, a2: &Point, b1: &Point, b2: &Point) -> bool {
    let tol = Tolerance::coarsest([a1, a2, b1, b2]);
    segments_are_collinear_within(a1, a2, b1, b2, tol)
}

/// Collinearity with an explicit tolerance.
///
/// Each segment's endpoints are checked against the other segment's line,
/// so the result does not depend on argument order.
pub fn segments_are_collinear_within(
    a1: &Point,
    a2: &Point,
    b1: &Point,
    b2: &Point,
    tol: Tolerance,
) -> bool {
    near_line(b1, a1, a2, tol)
        && near_line(b2, a1, a2, tol)
        && near_line(a1, b1, b2, tol)
        && near_line(a2, b1, b2, tol)
}
