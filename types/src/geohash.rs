//! Integer-only geohash decoding.
//!
//! Geohash cells are decoded straight into fixed-point coordinates so the
//! result is bit-for-bit identical on every host, with no floating point
//! involved.

use crate::error::ParcelError;
use crate::point::{COORD_SCALE, MAX_GEOHASH_PRECISION};

const BASE32: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Centre of a decoded geohash cell, in fixed-point units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeohashCell {
    pub lat: i64,
    pub lon: i64,
    /// Number of geohash characters the cell was decoded from.
    pub precision: u8,
}

fn char_value(c: u8) -> Option<u64> {
    let c = c.to_ascii_lowercase();
    BASE32.iter().position(|&b| b == c).map(|p| p as u64)
}

/// Centre of the `index`-th of `2^bits` equal slices of `[-half_span, half_span]`.
fn slice_centre(index: u64, bits: u32, half_span: i128) -> i64 {
    let span = 2 * half_span;
    let den: i128 = 1i128 << (bits + 1);
    let num = (2 * index as i128 + 1) * span;
    (-half_span + (num + den / 2) / den) as i64
}

/// Decode a geohash to the centre of its cell.
pub fn decode(hash: &str) -> Result<GeohashCell, ParcelError> {
    let bytes = hash.as_bytes();
    if bytes.is_empty() || bytes.len() > MAX_GEOHASH_PRECISION as usize {
        return Err(ParcelError::InvalidGeohash(hash.to_string()));
    }

    let (mut lat_idx, mut lat_bits) = (0u64, 0u32);
    let (mut lon_idx, mut lon_bits) = (0u64, 0u32);
    let mut lon_turn = true;

    for &c in bytes {
        let value = char_value(c).ok_or_else(|| ParcelError::InvalidGeohash(hash.to_string()))?;
        for shift in (0..5).rev() {
            let bit = (value >> shift) & 1;
            if lon_turn {
                lon_idx = (lon_idx << 1) | bit;
                lon_bits += 1;
            } else {
                lat_idx = (lat_idx << 1) | bit;
                lat_bits += 1;
            }
            lon_turn = !lon_turn;
        }
    }

    let scale = COORD_SCALE as i128;
    Ok(GeohashCell {
        lat: slice_centre(lat_idx, lat_bits, 90 * scale),
        lon: slice_centre(lon_idx, lon_bits, 180 * scale),
        precision: bytes.len() as u8,
    })
}

/// Height and width of a geohash cell at `precision`, in fixed-point units.
///
/// Returns `None` for precision 0 or anything above [`MAX_GEOHASH_PRECISION`].
pub fn cell_size(precision: u8) -> Option<(i64, i64)> {
    if precision == 0 || precision > MAX_GEOHASH_PRECISION {
        return None;
    }
    let total_bits = 5 * precision as u32;
    let lon_bits = total_bits.div_ceil(2);
    let lat_bits = total_bits / 2;
    let scale = COORD_SCALE as i128;
    let lat = (180 * scale) >> lat_bits;
    let lon = (360 * scale) >> lon_bits;
    Some((lat as i64, lon as i64))
}
