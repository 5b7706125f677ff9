use parcel_types::Height;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("index {index} out of range for contour of {len} points")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid height range: high {high} is below low {low}")]
    InvalidHeightRange { high: Height, low: Height },
}
