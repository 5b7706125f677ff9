//! Top-level error type shared across crates.

use thiserror::Error;

/// Errors raised while constructing or decoding domain values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParcelError {
    #[error("invalid geohash: {0}")]
    InvalidGeohash(String),

    #[error("coordinate out of range: lat={lat}, lon={lon}")]
    CoordinateOutOfRange { lat: i64, lon: i64 },

    #[error("height out of range: {0}")]
    HeightOutOfRange(i64),

    #[error("unsupported precision level: {0}")]
    InvalidPrecision(u8),

    #[error("contour needs at least 3 points, got {len}")]
    ContourTooShort { len: usize },

    #[error("invalid account address: {0}")]
    InvalidAddress(String),
}
