//! Events emitted by verification engines for subscribers.

use parcel_types::{DepositAmount, RegistryId, Timestamp};
use parcel_verification::ReportOutcome;

/// Verification-level events that observers can subscribe to via the [`EventBus`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerificationEvent {
    /// Verification was enabled; reports are accepted from `active_from`.
    VerificationEnabled {
        registry: RegistryId,
        minimal_deposit: DepositAmount,
        active_from: Timestamp,
    },
    /// Verification was disabled.
    VerificationDisabled { registry: RegistryId },
    /// A report succeeded: a token was burned and its deposit paid out.
    TokenSlashed(ReportOutcome),
}

/// Synchronous fan-out event bus for verification events.
///
/// Listeners are invoked inline on the emitting thread; keep handlers fast to
/// avoid stalling report processing.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&VerificationEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&VerificationEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &VerificationEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    #[test]
    fn emit_calls_all_listeners() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();

        let c1 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_| {
            c1.fetch_add(1, Ordering::SeqCst);
        }));

        let c2 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_| {
            c2.fetch_add(10, Ordering::SeqCst);
        }));

        bus.emit(&VerificationEvent::VerificationDisabled {
            registry: RegistryId::new(1),
        });

        assert_eq!(counter.load(Ordering::SeqCst), 11);
        assert_eq!(bus.listener_count(), 2);
    }

    #[test]
    fn emit_with_no_listeners_is_noop() {
        let bus = EventBus::default();
        bus.emit(&VerificationEvent::VerificationDisabled {
            registry: RegistryId::new(1),
        });
        assert_eq!(bus.listener_count(), 0);
    }
}
