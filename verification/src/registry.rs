//! Token registry seam.

use parcel_types::{Contour, Height, RegistryId, Timestamp, TokenId, TokenType};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("token {0} does not exist")]
    TokenNotFound(TokenId),

    #[error("details of token {0} are already set")]
    DetailsAlreadySet(TokenId),
}

/// Read access to token metadata plus the ability to burn.
///
/// Every getter fails with [`RegistryError::TokenNotFound`] for an id that was
/// never minted or has been burned. Burning is irreversible.
pub trait TokenRegistry {
    /// The registry this instance serves; escrow payouts are keyed by it.
    fn registry_id(&self) -> RegistryId;

    fn exists(&self, token: TokenId) -> bool;

    fn token_type(&self, token: TokenId) -> Result<TokenType, RegistryError>;

    /// `None` until the token's details have been populated.
    fn contour(&self, token: TokenId) -> Result<Option<Contour>, RegistryError>;

    /// Roof elevation; may be negative.
    fn highest_point(&self, token: TokenId) -> Result<Height, RegistryError>;

    /// Last time the contour or details changed. Never decreases.
    fn latest_timestamp(&self, token: TokenId) -> Result<Timestamp, RegistryError>;

    fn claims_uniqueness(&self, token: TokenId) -> Result<bool, RegistryError>;

    fn human_address(&self, token: TokenId) -> Result<String, RegistryError>;

    fn burn(&self, token: TokenId) -> Result<(), RegistryError>;
}

impl<T: TokenRegistry + ?Sized> TokenRegistry for &T {
    fn registry_id(&self) -> RegistryId {
        (**self).registry_id()
    }

    fn exists(&self, token: TokenId) -> bool {
        (**self).exists(token)
    }

    fn token_type(&self, token: TokenId) -> Result<TokenType, RegistryError> {
        (**self).token_type(token)
    }

    fn contour(&self, token: TokenId) -> Result<Option<Contour>, RegistryError> {
        (**self).contour(token)
    }

    fn highest_point(&self, token: TokenId) -> Result<Height, RegistryError> {
        (**self).highest_point(token)
    }

    fn latest_timestamp(&self, token: TokenId) -> Result<Timestamp, RegistryError> {
        (**self).latest_timestamp(token)
    }

    fn claims_uniqueness(&self, token: TokenId) -> Result<bool, RegistryError> {
        (**self).claims_uniqueness(token)
    }

    fn human_address(&self, token: TokenId) -> Result<String, RegistryError> {
        (**self).human_address(token)
    }

    fn burn(&self, token: TokenId) -> Result<(), RegistryError> {
        (**self).burn(token)
    }
}
