//! Deposit amounts held in escrow per token.
//!
//! Amounts are represented as fixed-point integers (u128) to avoid floating-point errors.
//! The smallest unit is 1 raw.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Collateral amount attached to a token.
///
/// Internally stored as raw units (u128) for precision.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct DepositAmount(u128);

impl DepositAmount {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u128) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl From<u128> for DepositAmount {
    fn from(raw: u128) -> Self {
        Self(raw)
    }
}

impl fmt::Display for DepositAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} raw", self.0)
    }
}
