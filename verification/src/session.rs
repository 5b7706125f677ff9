//! Verification session state.

use parcel_types::{DepositAmount, Timestamp, VerificationParams};
use tracing::info;

use crate::error::VerificationError;

/// Where a session stands relative to the ledger clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// Reports are rejected.
    Disabled,
    /// Enabled, but the grace period has not elapsed yet; reports are rejected.
    GracePeriod,
    /// Reports are evaluated.
    Active,
}

/// Enable/disable state and thresholds for one registry.
///
/// Starts disabled. While disabled the minimal deposit is always zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationSession {
    params: VerificationParams,
    enabled: bool,
    minimal_deposit: DepositAmount,
    active_from: Timestamp,
}

impl VerificationSession {
    pub fn new(params: VerificationParams) -> Self {
        Self {
            params,
            enabled: false,
            minimal_deposit: DepositAmount::ZERO,
            active_from: Timestamp::EPOCH,
        }
    }

    /// Enable reporting after a grace period of `timeout_secs` from `now`.
    pub fn enable(
        &mut self,
        minimal_deposit: DepositAmount,
        timeout_secs: u64,
        now: Timestamp,
    ) -> Result<(), VerificationError> {
        if self.enabled {
            return Err(VerificationError::AlreadyEnabled);
        }
        if timeout_secs < self.params.min_enable_timeout_secs {
            return Err(VerificationError::TimeoutTooShort {
                given: timeout_secs,
                minimum: self.params.min_enable_timeout_secs,
            });
        }
        self.minimal_deposit = minimal_deposit;
        self.active_from = now.saturating_add(timeout_secs);
        self.enabled = true;
        info!(
            minimal_deposit = %minimal_deposit,
            active_from = %self.active_from,
            "contour verification enabled"
        );
        Ok(())
    }

    /// Disable reporting and clear the minimal deposit.
    pub fn disable(&mut self) -> Result<(), VerificationError> {
        if !self.enabled {
            return Err(VerificationError::NotEnabled);
        }
        self.enabled = false;
        self.minimal_deposit = DepositAmount::ZERO;
        info!("contour verification disabled");
        Ok(())
    }

    pub fn phase(&self, now: Timestamp) -> SessionPhase {
        if !self.enabled {
            SessionPhase::Disabled
        } else if now < self.active_from {
            SessionPhase::GracePeriod
        } else {
            SessionPhase::Active
        }
    }

    pub fn is_reportable(&self, now: Timestamp) -> bool {
        self.phase(now) == SessionPhase::Active
    }

    pub fn ensure_reportable(&self, now: Timestamp) -> Result<(), VerificationError> {
        if self.is_reportable(now) {
            Ok(())
        } else {
            Err(VerificationError::VerificationDisabled)
        }
    }

    /// When a token last modified at `latest` becomes reportable for a missing deposit.
    pub fn burn_eligible_at(&self, latest: Timestamp) -> Timestamp {
        latest.saturating_add(self.params.new_token_timeout_secs)
    }

    /// Whether a token last modified at `latest` is old enough to be reported at `now`.
    pub fn is_burn_eligible(&self, latest: Timestamp, now: Timestamp) -> bool {
        latest.has_expired(self.params.new_token_timeout_secs, now)
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn minimal_deposit(&self) -> DepositAmount {
        self.minimal_deposit
    }

    pub fn active_from(&self) -> Timestamp {
        self.active_from
    }

    pub fn params(&self) -> &VerificationParams {
        &self.params
    }
}
