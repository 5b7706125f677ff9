use parcel_geometry::GeometryError;
use parcel_types::{DepositAmount, Timestamp, TokenId, TokenType};
use thiserror::Error;

use crate::escrow::EscrowError;
use crate::registry::RegistryError;

/// Why an enable/disable call or a report was rejected.
///
/// Every rejection leaves session and token state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("verification is disabled")]
    VerificationDisabled,

    #[error("verification is already enabled")]
    AlreadyEnabled,

    #[error("verification is not enabled")]
    NotEnabled,

    #[error("timeout {given}s is shorter than the minimum {minimum}s")]
    TimeoutTooShort { given: u64, minimum: u64 },

    /// The token's deposit meets the minimum, so there is nothing to slash.
    #[error("deposit of token {token} is sufficient: {balance} >= {minimum}")]
    InsufficientDeposit {
        token: TokenId,
        balance: DepositAmount,
        minimum: DepositAmount,
    },

    #[error("token {token} is too new; reportable from {eligible_at}")]
    TokenTooNew {
        token: TokenId,
        eligible_at: Timestamp,
    },

    #[error("token {0} does not claim uniqueness")]
    DoesNotClaimUniqueness(TokenId),

    #[error("token types differ: valid is {valid}, invalid is {invalid}")]
    TypeMismatch { valid: TokenType, invalid: TokenType },

    #[error("invalid token was modified at {invalid}, before valid token at {valid}")]
    StaleOrdering { valid: Timestamp, invalid: Timestamp },

    #[error("height ranges do not overlap")]
    HeightsDoNotOverlap,

    #[error("no intersection found")]
    NoIntersectionFound,

    #[error("inclusion not found")]
    InclusionNotFound,

    #[error("both tokens claim uniqueness under different addresses")]
    AmbiguousUniquenessClaim,

    #[error("token {0} cannot be reported against itself")]
    SameToken(TokenId),

    #[error("contour of token {0} is not set")]
    ContourNotSet(TokenId),

    #[error("proof point {index} does not match stored contour of token {token}")]
    PointMismatch { token: TokenId, index: usize },

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("escrow error: {0}")]
    Escrow(#[from] EscrowError),

    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),
}
