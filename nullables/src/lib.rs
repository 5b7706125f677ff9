//! Nullable infrastructure for deterministic testing.
//!
//! The verification processor reaches its collaborators (clock, token
//! registry, deposit escrow) through traits. This crate provides in-memory
//! implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod escrow;
pub mod registry;

pub use clock::NullClock;
pub use escrow::NullEscrow;
pub use registry::{NullRegistry, TokenDetails};
