//! Collinearity tolerance derived from point precision.

use parcel_types::geohash;
use parcel_types::Point;

/// Largest distance (in fixed-point units) a point may sit from a line and
/// still count as lying on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tolerance(i64);

impl Tolerance {
    /// Rounding slack for points stored at full fixed-point resolution.
    pub const FULL_RESOLUTION: Self = Self(2);

    /// Half the shorter side of a geohash cell at `precision`.
    ///
    /// A vertex quantized at that level can sit anywhere within its cell, so
    /// two surveys of one edge agree to within half a cell.
    pub fn for_precision(precision: u8) -> Self {
        match geohash::cell_size(precision) {
            Some((lat, lon)) => Self((lat.min(lon) / 2).max(Self::FULL_RESOLUTION.0)),
            None => Self::FULL_RESOLUTION,
        }
    }

    /// Tolerance of the coarsest point among `points`.
    pub fn coarsest<'a>(points: impl IntoIterator<Item = &'a Point>) -> Self {
        points
            .into_iter()
            .map(|p| Self::for_precision(p.precision()))
            .max()
            .unwrap_or(Self::FULL_RESOLUTION)
    }

    pub fn units(&self) -> i64 {
        self.0
    }
}
