//! Verification host: binds verification sessions to token registries.
//!
//! The host is the coordinator that:
//! - Loads thresholds and defaults from TOML ([`NodeConfig`])
//! - Initialises structured logging ([`init_logging`])
//! - Runs one [`VerificationEngine`] per token registry
//! - Fans engine events out to subscribers ([`EventBus`])

pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod logging;

pub use config::{NodeConfig, VerificationConfig};
pub use engine::VerificationEngine;
pub use error::NodeError;
pub use event::{EventBus, VerificationEvent};
pub use logging::{init_logging, LogFormat};
