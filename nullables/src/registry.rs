//! Nullable token registry: in-memory parcel tokens for testing.

use parcel_types::{AccountAddress, Contour, Height, RegistryId, Timestamp, TokenId, TokenType};
use parcel_verification::{Clock, RegistryError, TokenRegistry};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::clock::NullClock;

/// The mutable description of a parcel token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenDetails {
    pub token_type: TokenType,
    pub contour: Contour,
    /// Upper bound of the vertical range, in centimetres. Only rooms use it.
    pub highest_point: Height,
    pub claims_uniqueness: bool,
    pub human_address: String,
}

impl TokenDetails {
    /// Footprint-only details: no height, no uniqueness claim.
    pub fn new(token_type: TokenType, contour: Contour) -> Self {
        Self {
            token_type,
            contour,
            highest_point: 0,
            claims_uniqueness: false,
            human_address: String::new(),
        }
    }

    pub fn with_highest_point(mut self, highest_point: Height) -> Self {
        self.highest_point = highest_point;
        self
    }

    /// Claim to be the only unit at `human_address`.
    pub fn claiming_uniqueness(mut self, human_address: impl Into<String>) -> Self {
        self.claims_uniqueness = true;
        self.human_address = human_address.into();
        self
    }
}

struct TokenRecord {
    owner: AccountAddress,
    details: Option<TokenDetails>,
    latest: Timestamp,
}

/// An in-memory token registry.
///
/// Minted tokens start as empty NULL-type tokens. Every modification stamps
/// the token with the shared clock's time; the stamp never moves backwards.
pub struct NullRegistry {
    id: RegistryId,
    clock: Arc<NullClock>,
    tokens: Mutex<HashMap<TokenId, TokenRecord>>,
    next_id: AtomicU64,
}

impl NullRegistry {
    pub fn new(id: RegistryId, clock: Arc<NullClock>) -> Self {
        Self {
            id,
            clock,
            tokens: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Create an empty token owned by `owner`.
    pub fn mint(&self, owner: AccountAddress) -> TokenId {
        let token = TokenId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let record = TokenRecord {
            owner,
            details: None,
            latest: self.clock.now(),
        };
        self.tokens.lock().unwrap().insert(token, record);
        token
    }

    /// Populate a freshly minted token. Allowed once per token.
    pub fn set_initial_details(
        &self,
        token: TokenId,
        details: TokenDetails,
    ) -> Result<(), RegistryError> {
        let now = self.clock.now();
        self.update(token, |record| {
            if record.details.is_some() {
                return Err(RegistryError::DetailsAlreadySet(token));
            }
            record.details = Some(details);
            record.latest = record.latest.max(now);
            Ok(())
        })
    }

    /// Replace a token's details wholesale, as an approved modification would.
    pub fn apply_approved_update(
        &self,
        token: TokenId,
        details: TokenDetails,
    ) -> Result<(), RegistryError> {
        let now = self.clock.now();
        self.update(token, |record| {
            record.details = Some(details);
            record.latest = record.latest.max(now);
            Ok(())
        })
    }

    /// Change the owner. Only affects who may withdraw the token's deposit.
    pub fn transfer(&self, token: TokenId, to: AccountAddress) -> Result<(), RegistryError> {
        self.update(token, |record| {
            record.owner = to;
            Ok(())
        })
    }

    pub fn owner_of(&self, token: TokenId) -> Result<AccountAddress, RegistryError> {
        self.read(token, |record| record.owner.clone())
    }

    pub fn token_count(&self) -> usize {
        self.tokens.lock().unwrap().len()
    }

    fn read<T>(
        &self,
        token: TokenId,
        f: impl FnOnce(&TokenRecord) -> T,
    ) -> Result<T, RegistryError> {
        self.tokens
            .lock()
            .unwrap()
            .get(&token)
            .map(f)
            .ok_or(RegistryError::TokenNotFound(token))
    }

    fn update(
        &self,
        token: TokenId,
        f: impl FnOnce(&mut TokenRecord) -> Result<(), RegistryError>,
    ) -> Result<(), RegistryError> {
        let mut tokens = self.tokens.lock().unwrap();
        let record = tokens
            .get_mut(&token)
            .ok_or(RegistryError::TokenNotFound(token))?;
        f(record)
    }
}

impl TokenRegistry for NullRegistry {
    fn registry_id(&self) -> RegistryId {
        self.id
    }

    fn exists(&self, token: TokenId) -> bool {
        self.tokens.lock().unwrap().contains_key(&token)
    }

    fn token_type(&self, token: TokenId) -> Result<TokenType, RegistryError> {
        self.read(token, |r| {
            r.details
                .as_ref()
                .map_or(TokenType::Null, |d| d.token_type)
        })
    }

    fn contour(&self, token: TokenId) -> Result<Option<Contour>, RegistryError> {
        self.read(token, |r| r.details.as_ref().map(|d| d.contour.clone()))
    }

    fn highest_point(&self, token: TokenId) -> Result<Height, RegistryError> {
        self.read(token, |r| r.details.as_ref().map_or(0, |d| d.highest_point))
    }

    fn latest_timestamp(&self, token: TokenId) -> Result<Timestamp, RegistryError> {
        self.read(token, |r| r.latest)
    }

    fn claims_uniqueness(&self, token: TokenId) -> Result<bool, RegistryError> {
        self.read(token, |r| {
            r.details.as_ref().is_some_and(|d| d.claims_uniqueness)
        })
    }

    fn human_address(&self, token: TokenId) -> Result<String, RegistryError> {
        self.read(token, |r| {
            r.details
                .as_ref()
                .map(|d| d.human_address.clone())
                .unwrap_or_default()
        })
    }

    fn burn(&self, token: TokenId) -> Result<(), RegistryError> {
        self.tokens
            .lock()
            .unwrap()
            .remove(&token)
            .map(|_| ())
            .ok_or(RegistryError::TokenNotFound(token))
    }
}
