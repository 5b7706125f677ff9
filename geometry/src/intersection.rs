//! Segment intersection between two contours.

use crate::error::GeometryError;
use crate::segment::{orientation, segments_are_collinear};
use parcel_types::{Contour, Point};

/// Whether two collinear segments share a stretch of positive length.
///
/// Both segments are projected onto whichever axis the four endpoints spread
/// further along; the choice depends only on the point set, so it is the same
/// for either argument order.
fn collinear_overlap(a1: &Point, a2: &Point, b1: &Point, b2: &Point) -> bool {
    let pts = [a1, a2, b1, b2];
    let spread = |f: fn(&Point) -> i64| {
        let max = pts.iter().map(|p| f(p)).max().unwrap_or(0);
        let min = pts.iter().map(|p| f(p)).min().unwrap_or(0);
        max as i128 - min as i128
    };
    let axis: fn(&Point) -> i64 = if spread(Point::lon) >= spread(Point::lat) {
        Point::lon
    } else {
        Point::lat
    };

    let (a_lo, a_hi) = (axis(a1).min(axis(a2)), axis(a1).max(axis(a2)));
    let (b_lo, b_hi) = (axis(b1).min(axis(b2)), axis(b1).max(axis(b2)));
    a_lo.max(b_lo) < a_hi.min(b_hi)
}

/// Whether segment `a1..a2` intersects segment `b1..b2`.
///
/// Collinear segments (within tolerance) intersect when they overlap, unless
/// `exclude_collinear` is set, in which case they never do. Other segments
/// intersect only when they properly cross; meeting at a vertex or an
/// endpoint resting on the other segment is not a crossing.
pub fn segments_intersect(
    a1: &Point,
    a2: &Point,
    b1: &Point,
    b2: &Point,
    exclude_collinear: bool,
) -> bool {
    if segments_are_collinear(a1, a2, b1, b2) {
        return !exclude_collinear && collinear_overlap(a1, a2, b1, b2);
    }

    let o1 = orientation(a1, a2, b1);
    let o2 = orientation(a1, a2, b2);
    let o3 = orientation(b1, b2, a1);
    let o4 = orientation(b1, b2, a2);
    o1 * o2 < 0 && o3 * o4 < 0
}

fn segment_of(contour: &Contour, index: usize) -> Result<(Point, Point), GeometryError> {
    contour.segment(index).ok_or(GeometryError::IndexOutOfRange {
        index,
        len: contour.len(),
    })
}

/// Whether segment `seg_a` of `contour_a` intersects segment `seg_b` of `contour_b`.
pub fn contour_segments_intersects(
    contour_a: &Contour,
    contour_b: &Contour,
    seg_a: usize,
    seg_b: usize,
    exclude_collinear: bool,
) -> Result<bool, GeometryError> {
    let (a1, a2) = segment_of(contour_a, seg_a)?;
    let (b1, b2) = segment_of(contour_b, seg_b)?;
    Ok(segments_intersect(&a1, &a2, &b1, &b2, exclude_collinear))
}
