//! Fundamental types for parcel registries.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! fixed-point points and contours, token identifiers and kinds, deposit amounts,
//! account addresses, timestamps, and verification parameters.

pub mod address;
pub mod amount;
pub mod contour;
pub mod error;
pub mod geohash;
pub mod params;
pub mod point;
pub mod time;
pub mod token;

pub use address::AccountAddress;
pub use amount::DepositAmount;
pub use contour::Contour;
pub use error::ParcelError;
pub use params::VerificationParams;
pub use point::{Height, Point, COORD_SCALE, MAX_GEOHASH_PRECISION};
pub use time::Timestamp;
pub use token::{RegistryId, TokenId, TokenType};
