//! Height helpers for indoor units.

use crate::error::GeometryError;
use parcel_types::{Contour, Height};

/// Lowest vertex height of a contour. Sloped floors give vertices different heights.
pub fn lowest_elevation(contour: &Contour) -> Height {
    contour
        .points()
        .iter()
        .map(|p| p.height())
        .min()
        .unwrap_or_default()
}

/// Whether `[low_a, high_a]` and `[low_b, high_b]` overlap by more than a touch.
///
/// An inverted interval (`high < low`) is rejected rather than reordered.
pub fn check_vertical_intersection(
    high_a: Height,
    low_a: Height,
    high_b: Height,
    low_b: Height,
) -> Result<bool, GeometryError> {
    for (high, low) in [(high_a, low_a), (high_b, low_b)] {
        if high < low {
            return Err(GeometryError::InvalidHeightRange { high, low });
        }
    }
    Ok(low_a < high_b && low_b < high_a)
}
