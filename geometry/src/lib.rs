//! Contour geometry kernel.
//!
//! Pure, stateless functions over fixed-point [`Point`](parcel_types::Point)s and
//! [`Contour`](parcel_types::Contour)s. All arithmetic is exact integer math in
//! `i128`; the only approximation is the explicit [`Tolerance`] applied when
//! deciding whether segments lie on one line, which scales with the geohash
//! precision the points were quantized at.

pub mod elevation;
pub mod error;
pub mod inclusion;
pub mod intersection;
pub mod segment;
pub mod tolerance;

pub use elevation::{check_vertical_intersection, lowest_elevation};
pub use error::GeometryError;
pub use inclusion::{point_inside_contour, point_strictly_inside, InclusionType};
pub use intersection::{contour_segments_intersects, segments_intersect};
pub use segment::{segments_are_collinear, segments_are_collinear_within};
pub use tolerance::Tolerance;
