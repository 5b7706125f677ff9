//! Token identifiers and kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a token within one registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenId(u64);

impl TokenId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of a token registry (the token contract a verification engine is bound to).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RegistryId(u64);

impl RegistryId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RegistryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "registry-{}", self.0)
    }
}

/// What kind of parcel a token describes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenType {
    /// Details not populated yet.
    #[default]
    Null,
    LandPlot,
    Building,
    /// Indoor unit; conflicts require overlapping height ranges as well.
    Room,
    Package,
}

impl TokenType {
    /// Whether conflicts between two tokens of this type also depend on height.
    pub fn is_indoor(&self) -> bool {
        matches!(self, Self::Room)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::LandPlot => "LAND_PLOT",
            Self::Building => "BUILDING",
            Self::Room => "ROOM",
            Self::Package => "PACKAGE",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
