//! Polygon boundaries of parcels.

use crate::error::ParcelError;
use crate::point::{Height, Point};
use serde::{Deserialize, Serialize};

/// Smallest number of vertices a contour may have.
pub const MIN_CONTOUR_POINTS: usize = 3;

/// An ordered, cyclic sequence of points describing a simple polygon.
///
/// Segment `i` joins point `i` to point `(i + 1) % len`. Contours are
/// replaced wholesale on update, never edited in place.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct Contour(Vec<Point>);

impl Contour {
    pub fn new(points: Vec<Point>) -> Result<Self, ParcelError> {
        if points.len() < MIN_CONTOUR_POINTS {
            return Err(ParcelError::ContourTooShort { len: points.len() });
        }
        Ok(Self(points))
    }

    /// Build a ground-level contour from geohash vertices.
    pub fn from_geohashes<S: AsRef<str>>(hashes: &[S]) -> Result<Self, ParcelError> {
        let points = hashes
            .iter()
            .map(|h| Point::from_geohash(h.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(points)
    }

    /// The same outline with every vertex at `height`.
    pub fn with_height(&self, height: Height) -> Result<Self, ParcelError> {
        let points = self
            .0
            .iter()
            .map(|p| p.with_height(height))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self(points))
    }

    pub fn points(&self) -> &[Point] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn point(&self, index: usize) -> Option<&Point> {
        self.0.get(index)
    }

    /// Endpoints of segment `index`, wrapping the last segment back to point 0.
    pub fn segment(&self, index: usize) -> Option<(Point, Point)> {
        let start = *self.0.get(index)?;
        let end = self.0[(index + 1) % self.0.len()];
        Some((start, end))
    }

    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        (0..self.0.len()).filter_map(move |i| self.segment(i))
    }
}

impl TryFrom<Vec<Point>> for Contour {
    type Error = ParcelError;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<Contour> for Vec<Point> {
    fn from(contour: Contour) -> Self {
        contour.0
    }
}
