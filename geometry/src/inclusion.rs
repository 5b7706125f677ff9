//! Point-in-polygon tests.

use crate::error::GeometryError;
use crate::segment::near_segment;
use crate::tolerance::Tolerance;
use parcel_types::{Contour, Point};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which contour's vertex is claimed to lie inside the other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InclusionType {
    /// A vertex of contour A lies inside contour B.
    AInsideB,
    /// A vertex of contour B lies inside contour A.
    BInsideA,
}

impl fmt::Display for InclusionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AInsideB => f.write_str("A_INSIDE_B"),
            Self::BInsideA => f.write_str("B_INSIDE_A"),
        }
    }
}

/// Whether `p` lies strictly inside `contour`.
///
/// Points within tolerance of an edge are on the boundary and do not count.
/// The band width comes from the edge's own endpoints, never from `p`, so the
/// precision a vertex is stored at cannot move it out of the interior. The rest is even-odd ray casting along +longitude with the half-open rule
/// `(lat_i > p.lat) != (lat_j > p.lat)`, so a ray through a vertex is counted
/// once and horizontal edges are skipped.
pub fn point_strictly_inside(p: &Point, contour: &Contour) -> bool {
    for (s1, s2) in contour.segments() {
        if near_segment(p, &s1, &s2, Tolerance::coarsest([&s1, &s2])) {
            return false;
        }
    }

    let (px, py) = (p.lon() as i128, p.lat() as i128);
    let mut inside = false;
    for (vi, vj) in contour.segments() {
        let (xi, yi) = (vi.lon() as i128, vi.lat() as i128);
        let (xj, yj) = (vj.lon() as i128, vj.lat() as i128);
        if (yi > py) == (yj > py) {
            continue;
        }
        // px < xi + (xj - xi) * (py - yi) / (yj - yi), without dividing.
        let den = yj - yi;
        let lhs = (px - xi) * den;
        let rhs = (xj - xi) * (py - yi);
        let crosses = if den > 0 { lhs < rhs } else { lhs > rhs };
        if crosses {
            inside = !inside;
        }
    }
    inside
}

/// Whether vertex `point_index` of the inner contour lies strictly inside the
/// outer one, where `inclusion` picks which of `contour_a` / `contour_b` is inner.
pub fn point_inside_contour(
    contour_a: &Contour,
    contour_b: &Contour,
    inclusion: InclusionType,
    point_index: usize,
) -> Result<bool, GeometryError> {
    let (inner, outer) = match inclusion {
        InclusionType::AInsideB => (contour_a, contour_b),
        InclusionType::BInsideA => (contour_b, contour_a),
    };
    let point = inner
        .point(point_index)
        .ok_or(GeometryError::IndexOutOfRange {
            index: point_index,
            len: inner.len(),
        })?;
    Ok(point_strictly_inside(point, outer))
}
