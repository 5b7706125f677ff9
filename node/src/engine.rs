//! One registry's verification: session state, report processing, events.

use parcel_types::{AccountAddress, DepositAmount, RegistryId, Timestamp, TokenId};
use parcel_verification::{
    Clock, Escrow, InclusionProof, IntersectionProof, ReportOutcome, ReportProcessor,
    SessionPhase, TokenRegistry, VerificationSession,
};
use tracing::debug;

use crate::config::VerificationConfig;
use crate::event::{EventBus, VerificationEvent};
use crate::NodeError;

/// Binds a [`VerificationSession`] to one registry and its escrow.
///
/// Engines share nothing, so a host can run one per registry side by side.
pub struct VerificationEngine<R, E, C> {
    session: VerificationSession,
    processor: ReportProcessor<R, E, C>,
    events: EventBus,
    default_minimal_deposit: DepositAmount,
    default_grace_period_secs: u64,
}

impl<R: TokenRegistry, E: Escrow, C: Clock> VerificationEngine<R, E, C> {
    pub fn new(config: &VerificationConfig, registry: R, escrow: E, clock: C) -> Self {
        Self {
            session: VerificationSession::new(config.params()),
            processor: ReportProcessor::new(registry, escrow, clock),
            events: EventBus::new(),
            default_minimal_deposit: config.default_minimal_deposit(),
            default_grace_period_secs: config.default_grace_period_secs,
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&VerificationEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    pub fn registry_id(&self) -> RegistryId {
        self.processor.registry().registry_id()
    }

    /// Enable reporting once `timeout_secs` have passed.
    pub fn enable(
        &mut self,
        minimal_deposit: DepositAmount,
        timeout_secs: u64,
    ) -> Result<(), NodeError> {
        let now = self.processor.clock().now();
        self.session.enable(minimal_deposit, timeout_secs, now)?;
        self.emit(VerificationEvent::VerificationEnabled {
            registry: self.registry_id(),
            minimal_deposit,
            active_from: self.session.active_from(),
        });
        Ok(())
    }

    /// Enable with the configured default deposit and grace period.
    pub fn enable_with_defaults(&mut self) -> Result<(), NodeError> {
        self.enable(self.default_minimal_deposit, self.default_grace_period_secs)
    }

    pub fn disable(&mut self) -> Result<(), NodeError> {
        self.session.disable()?;
        self.emit(VerificationEvent::VerificationDisabled {
            registry: self.registry_id(),
        });
        Ok(())
    }

    pub fn report_no_deposit(
        &self,
        reporter: &AccountAddress,
        token: TokenId,
    ) -> Result<ReportOutcome, NodeError> {
        let outcome = self
            .processor
            .report_no_deposit(&self.session, reporter, token)?;
        Ok(self.slashed(outcome))
    }

    pub fn report_intersection(
        &self,
        reporter: &AccountAddress,
        proof: &IntersectionProof,
    ) -> Result<ReportOutcome, NodeError> {
        let outcome = self
            .processor
            .report_intersection(&self.session, reporter, proof)?;
        Ok(self.slashed(outcome))
    }

    pub fn report_inclusion(
        &self,
        reporter: &AccountAddress,
        proof: &InclusionProof,
    ) -> Result<ReportOutcome, NodeError> {
        let outcome = self
            .processor
            .report_inclusion(&self.session, reporter, proof)?;
        Ok(self.slashed(outcome))
    }

    pub fn enabled(&self) -> bool {
        self.session.enabled()
    }

    pub fn minimal_deposit(&self) -> DepositAmount {
        self.session.minimal_deposit()
    }

    pub fn active_from(&self) -> Timestamp {
        self.session.active_from()
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase(self.processor.clock().now())
    }

    pub fn session(&self) -> &VerificationSession {
        &self.session
    }

    pub fn processor(&self) -> &ReportProcessor<R, E, C> {
        &self.processor
    }

    fn slashed(&self, outcome: ReportOutcome) -> ReportOutcome {
        self.emit(VerificationEvent::TokenSlashed(outcome.clone()));
        outcome
    }

    fn emit(&self, event: VerificationEvent) {
        debug!(registry = %self.registry_id(), ?event, "emitting verification event");
        self.events.emit(&event);
    }
}
