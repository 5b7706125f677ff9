//! Host configuration with TOML file support.

use parcel_types::{DepositAmount, VerificationParams};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::logging::LogFormat;
use crate::NodeError;

/// Configuration for a verification host.
///
/// Can be loaded from a TOML file via [`NodeConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// The `[verification]` table.
    #[serde(default)]
    pub verification: VerificationConfig,
}

/// Verification thresholds plus the defaults used when enabling without arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationConfig {
    /// Shortest grace period an enable call may request.
    #[serde(default = "default_timeout_secs")]
    pub min_enable_timeout_secs: u64,

    /// Age a token must reach before it can be reported for a missing deposit.
    #[serde(default = "default_timeout_secs")]
    pub new_token_timeout_secs: u64,

    /// Minimal deposit applied by [`VerificationEngine::enable_with_defaults`](crate::VerificationEngine::enable_with_defaults).
    #[serde(default)]
    pub default_minimal_deposit: u64,

    /// Grace period applied by [`VerificationEngine::enable_with_defaults`](crate::VerificationEngine::enable_with_defaults).
    #[serde(default = "default_timeout_secs")]
    pub default_grace_period_secs: u64,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout_secs() -> u64 {
    parcel_types::params::ONE_HOUR_SECS
}

// ── Impl ───────────────────────────────────────────────────────────────

impl NodeConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, NodeError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| NodeError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        let config: Self = toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, NodeError> {
        toml::to_string_pretty(self).map_err(|e| NodeError::Config(e.to_string()))
    }

    pub fn log_format(&self) -> Result<LogFormat, NodeError> {
        self.log_format.parse()
    }

    /// Reject settings no engine could run with.
    pub fn validate(&self) -> Result<(), NodeError> {
        self.log_format()?;
        let v = &self.verification;
        if v.default_grace_period_secs < v.min_enable_timeout_secs {
            return Err(NodeError::Config(format!(
                "default_grace_period_secs {} is below min_enable_timeout_secs {}",
                v.default_grace_period_secs, v.min_enable_timeout_secs
            )));
        }
        Ok(())
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            log_format: default_log_format(),
            log_level: default_log_level(),
            verification: VerificationConfig::default(),
        }
    }
}

impl VerificationConfig {
    pub fn params(&self) -> VerificationParams {
        VerificationParams {
            min_enable_timeout_secs: self.min_enable_timeout_secs,
            new_token_timeout_secs: self.new_token_timeout_secs,
        }
    }

    pub fn default_minimal_deposit(&self) -> DepositAmount {
        DepositAmount::new(u128::from(self.default_minimal_deposit))
    }
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            min_enable_timeout_secs: default_timeout_secs(),
            new_token_timeout_secs: default_timeout_secs(),
            default_minimal_deposit: 0,
            default_grace_period_secs: default_timeout_secs(),
        }
    }
}
