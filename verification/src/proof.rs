//! Proof payloads submitted with conflict reports.
//!
//! The points in a proof are claims about stored contour data. The processor
//! re-reads the contours from the registry and rejects any proof whose points
//! differ from what is stored at the named indices.

use parcel_geometry::InclusionType;
use parcel_types::{Point, TokenId};
use serde::{Deserialize, Serialize};

/// Claims that a segment of `valid` crosses a segment of `invalid`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntersectionProof {
    pub valid: TokenId,
    pub invalid: TokenId,
    pub valid_segment: usize,
    pub valid_start: Point,
    pub valid_end: Point,
    pub invalid_segment: usize,
    pub invalid_start: Point,
    pub invalid_end: Point,
    /// Prove a genuine crossing: shared (collinear) edges do not count.
    pub exclude_collinear: bool,
}

/// Claims that a vertex of one token's contour lies inside the other's.
///
/// With [`InclusionType::AInsideB`] the vertex belongs to `valid`; with
/// [`InclusionType::BInsideA`] it belongs to `invalid`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InclusionProof {
    pub valid: TokenId,
    pub invalid: TokenId,
    pub inclusion: InclusionType,
    pub point_index: usize,
    pub point: Point,
}
