//! Deposit escrow seam.

use parcel_types::{AccountAddress, DepositAmount, RegistryId, TokenId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EscrowError {
    #[error("escrow is not bound to {0}")]
    UnknownRegistry(RegistryId),

    #[error("token {0} does not exist")]
    TokenNotFound(TokenId),

    #[error("{caller} is not the owner of token {token}")]
    NotTokenOwner {
        token: TokenId,
        caller: AccountAddress,
    },

    #[error("deposit amount must be positive")]
    ZeroAmount,

    #[error("arithmetic overflow")]
    Overflow,
}

/// Holds per-token collateral.
pub trait Escrow {
    /// Current deposit held for `token` of `registry`.
    fn deposit_balance_of(
        &self,
        registry: RegistryId,
        token: TokenId,
    ) -> Result<DepositAmount, EscrowError>;

    /// Pay the full deposit to `recipient` and zero it. Returns the amount paid.
    ///
    /// Fails with [`EscrowError::UnknownRegistry`] when `registry` is not one
    /// this escrow holds deposits for. On any error the deposit is untouched.
    fn payout(
        &self,
        registry: RegistryId,
        token: TokenId,
        recipient: &AccountAddress,
    ) -> Result<DepositAmount, EscrowError>;
}

impl<T: Escrow + ?Sized> Escrow for &T {
    fn deposit_balance_of(
        &self,
        registry: RegistryId,
        token: TokenId,
    ) -> Result<DepositAmount, EscrowError> {
        (**self).deposit_balance_of(registry, token)
    }

    fn payout(
        &self,
        registry: RegistryId,
        token: TokenId,
        recipient: &AccountAddress,
    ) -> Result<DepositAmount, EscrowError> {
        (**self).payout(registry, token, recipient)
    }
}
