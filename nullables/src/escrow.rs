//! Nullable escrow: in-memory deposit holder for testing.

use parcel_types::{AccountAddress, DepositAmount, RegistryId, TokenId};
use parcel_verification::{Escrow, EscrowError, TokenRegistry};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::registry::NullRegistry;

/// Holds per-token deposits for the registries bound to it.
///
/// Withdrawals and payouts are credited to in-memory account balances so
/// tests can observe where the money went.
pub struct NullEscrow {
    registries: Mutex<HashMap<RegistryId, Arc<NullRegistry>>>,
    deposits: Mutex<HashMap<(RegistryId, TokenId), DepositAmount>>,
    accounts: Mutex<HashMap<AccountAddress, DepositAmount>>,
}

impl NullEscrow {
    pub fn new() -> Self {
        Self {
            registries: Mutex::new(HashMap::new()),
            deposits: Mutex::new(HashMap::new()),
            accounts: Mutex::new(HashMap::new()),
        }
    }

    /// Accept deposits for tokens of `registry`.
    pub fn bind(&self, registry: Arc<NullRegistry>) {
        self.registries
            .lock()
            .unwrap()
            .insert(registry.registry_id(), registry);
    }

    /// Add `amount` to the deposit of `token`. Anyone may deposit, any number of times.
    pub fn deposit(
        &self,
        registry: RegistryId,
        token: TokenId,
        _from: &AccountAddress,
        amount: DepositAmount,
    ) -> Result<DepositAmount, EscrowError> {
        if amount.is_zero() {
            return Err(EscrowError::ZeroAmount);
        }
        let reg = self.registry(registry)?;
        if !reg.exists(token) {
            return Err(EscrowError::TokenNotFound(token));
        }

        let mut deposits = self.deposits.lock().unwrap();
        let balance = deposits.entry((registry, token)).or_default();
        *balance = balance.checked_add(amount).ok_or(EscrowError::Overflow)?;
        Ok(*balance)
    }

    /// Return the whole deposit to the token's current owner.
    pub fn withdraw(
        &self,
        registry: RegistryId,
        token: TokenId,
        caller: &AccountAddress,
    ) -> Result<DepositAmount, EscrowError> {
        let reg = self.registry(registry)?;
        let owner = reg
            .owner_of(token)
            .map_err(|_| EscrowError::TokenNotFound(token))?;
        if &owner != caller {
            return Err(EscrowError::NotTokenOwner {
                token,
                caller: caller.clone(),
            });
        }
        self.settle(registry, token, caller)
    }

    /// Funds credited to `account` by withdrawals and payouts.
    pub fn balance_of_account(&self, account: &AccountAddress) -> DepositAmount {
        self.accounts
            .lock()
            .unwrap()
            .get(account)
            .copied()
            .unwrap_or_default()
    }

    fn registry(&self, registry: RegistryId) -> Result<Arc<NullRegistry>, EscrowError> {
        self.registries
            .lock()
            .unwrap()
            .get(&registry)
            .cloned()
            .ok_or(EscrowError::UnknownRegistry(registry))
    }

    /// Move the whole deposit of `token` to `account`. On overflow nothing moves.
    fn settle(
        &self,
        registry: RegistryId,
        token: TokenId,
        account: &AccountAddress,
    ) -> Result<DepositAmount, EscrowError> {
        let mut deposits = self.deposits.lock().unwrap();
        let mut accounts = self.accounts.lock().unwrap();
        let amount = deposits
            .get(&(registry, token))
            .copied()
            .unwrap_or_default();
        let current = accounts.get(account).copied().unwrap_or_default();
        let credited = current.checked_add(amount).ok_or(EscrowError::Overflow)?;
        deposits.remove(&(registry, token));
        accounts.insert(account.clone(), credited);
        Ok(amount)
    }
}

impl Default for NullEscrow {
    fn default() -> Self {
        Self::new()
    }
}

impl Escrow for NullEscrow {
    fn deposit_balance_of(
        &self,
        registry: RegistryId,
        token: TokenId,
    ) -> Result<DepositAmount, EscrowError> {
        self.registry(registry)?;
        Ok(self
            .deposits
            .lock()
            .unwrap()
            .get(&(registry, token))
            .copied()
            .unwrap_or_default())
    }

    fn payout(
        &self,
        registry: RegistryId,
        token: TokenId,
        recipient: &AccountAddress,
    ) -> Result<DepositAmount, EscrowError> {
        self.registry(registry)?;
        self.settle(registry, token, recipient)
    }
}
