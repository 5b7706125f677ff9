//! Fixed-point encoded points.
//!
//! A point is a latitude/longitude pair in units of 1e-10 degree, a height in
//! centimetres, and the geohash precision level it was quantized at. Its
//! canonical scalar form is a `u128`:
//!
//! | bits     | field                         |
//! |----------|-------------------------------|
//! | 127..120 | precision (0 = full, 1..=12)  |
//! | 119..96  | height, signed 24-bit         |
//! | 95..48   | latitude, signed 48-bit       |
//! | 47..0    | longitude, signed 48-bit      |

use crate::error::ParcelError;
use crate::geohash;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed-point units per degree.
pub const COORD_SCALE: i64 = 10_000_000_000;

/// Longest geohash accepted, and the finest precision level.
pub const MAX_GEOHASH_PRECISION: u8 = 12;

/// Elevation in centimetres. May be negative (below ground level).
pub type Height = i32;

pub const MAX_LAT: i64 = 90 * COORD_SCALE;
pub const MAX_LON: i64 = 180 * COORD_SCALE;
pub const MIN_HEIGHT: Height = -(1 << 23);
pub const MAX_HEIGHT: Height = (1 << 23) - 1;

const MASK_48: u128 = (1 << 48) - 1;
const MASK_24: u128 = (1 << 24) - 1;

/// An immutable encoded point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    lat: i64,
    lon: i64,
    height: Height,
    precision: u8,
}

impl Point {
    /// A point at full fixed-point resolution.
    pub fn new(lat: i64, lon: i64, height: Height) -> Result<Self, ParcelError> {
        Self::with_precision(lat, lon, height, 0)
    }

    /// A point quantized at the given geohash precision level.
    pub fn with_precision(
        lat: i64,
        lon: i64,
        height: Height,
        precision: u8,
    ) -> Result<Self, ParcelError> {
        if !(-MAX_LAT..=MAX_LAT).contains(&lat) || !(-MAX_LON..=MAX_LON).contains(&lon) {
            return Err(ParcelError::CoordinateOutOfRange { lat, lon });
        }
        if !(MIN_HEIGHT..=MAX_HEIGHT).contains(&height) {
            return Err(ParcelError::HeightOutOfRange(height as i64));
        }
        if precision > MAX_GEOHASH_PRECISION {
            return Err(ParcelError::InvalidPrecision(precision));
        }
        Ok(Self {
            lat,
            lon,
            height,
            precision,
        })
    }

    /// Decode a geohash to the centre of its cell at ground level.
    pub fn from_geohash(hash: &str) -> Result<Self, ParcelError> {
        let cell = geohash::decode(hash)?;
        Self::with_precision(cell.lat, cell.lon, 0, cell.precision)
    }

    /// The same position at a different height.
    pub fn with_height(self, height: Height) -> Result<Self, ParcelError> {
        Self::with_precision(self.lat, self.lon, height, self.precision)
    }

    pub fn lat(&self) -> i64 {
        self.lat
    }

    pub fn lon(&self) -> i64 {
        self.lon
    }

    pub fn height(&self) -> Height {
        self.height
    }

    /// Geohash precision level, or 0 for full resolution.
    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Pack into the canonical scalar form.
    pub fn pack(&self) -> u128 {
        let lon = (self.lon as u128) & MASK_48;
        let lat = (self.lat as u128) & MASK_48;
        let height = (self.height as u128) & MASK_24;
        ((self.precision as u128) << 120) | (height << 96) | (lat << 48) | lon
    }

    /// Unpack a scalar produced by [`Point::pack`].
    pub fn unpack(packed: u128) -> Result<Self, ParcelError> {
        let lon = sign_extend_48(packed & MASK_48);
        let lat = sign_extend_48((packed >> 48) & MASK_48);
        let height = ((((packed >> 96) & MASK_24) as u32) << 8) as i32 >> 8;
        let precision = (packed >> 120) as u8;
        Self::with_precision(lat, lon, height, precision)
    }
}

fn sign_extend_48(raw: u128) -> i64 {
    ((raw as u64) << 16) as i64 >> 16
}

fn fmt_degrees(f: &mut fmt::Formatter<'_>, units: i64) -> fmt::Result {
    let sign = if units < 0 { "-" } else { "" };
    let abs = units.unsigned_abs();
    let scale = COORD_SCALE as u64;
    write!(f, "{}{}.{:010}", sign, abs / scale, abs % scale)
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_degrees(f, self.lat)?;
        f.write_str(",")?;
        fmt_degrees(f, self.lon)?;
        write!(f, "@{}cm", self.height)
    }
}
