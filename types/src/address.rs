//! Account address of a reporter, depositor, or token owner.

use crate::error::ParcelError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A ledger account address: `0x` followed by 40 hex digits.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountAddress(String);

impl AccountAddress {
    /// The standard prefix for all account addresses.
    pub const PREFIX: &'static str = "0x";

    /// Number of hex digits after the prefix.
    pub const HEX_LEN: usize = 40;

    /// Parse and validate an address string. Hex digits are normalised to lowercase.
    pub fn parse(raw: &str) -> Result<Self, ParcelError> {
        let body = raw
            .strip_prefix(Self::PREFIX)
            .ok_or_else(|| ParcelError::InvalidAddress(raw.to_string()))?;
        if body.len() != Self::HEX_LEN || !body.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParcelError::InvalidAddress(raw.to_string()));
        }
        Ok(Self(format!("{}{}", Self::PREFIX, body.to_ascii_lowercase())))
    }

    /// Deterministic address for a small integer seed. Handy for fixtures.
    pub fn from_seed(seed: u64) -> Self {
        Self(format!("{}{:040x}", Self::PREFIX, seed))
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for AccountAddress {
    type Error = ParcelError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_mixed_case_and_normalises() {
        let addr = AccountAddress::parse("0xABCDEF0123456789abcdef0123456789ABCDEF01").unwrap();
        assert_eq!(addr.as_str(), "0xabcdef0123456789abcdef0123456789abcdef01");
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(AccountAddress::parse("abcdef0123456789abcdef0123456789abcdef01").is_err());
        assert!(AccountAddress::parse("0x1234").is_err());
        assert!(AccountAddress::parse("0xzzcdef0123456789abcdef0123456789abcdef01").is_err());
    }

    #[test]
    fn from_seed_is_valid() {
        let addr = AccountAddress::from_seed(42);
        assert_eq!(AccountAddress::parse(addr.as_str()).unwrap(), addr);
    }
}
