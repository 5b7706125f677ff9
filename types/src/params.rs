//! Verification parameters fixed per registry deployment.

use serde::{Deserialize, Serialize};

/// One hour, the smallest grace period an administrator may configure.
pub const ONE_HOUR_SECS: u64 = 3600;

/// Parameters a verification session is created with.
///
/// The minimal deposit and grace period themselves are supplied at enable time;
/// these bound what an administrator may choose and how old a token must be
/// before it can be slashed for a missing deposit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationParams {
    /// Shortest grace period accepted when enabling verification (seconds).
    #[serde(default = "default_min_enable_timeout")]
    pub min_enable_timeout_secs: u64,

    /// Minimum token age (since its last modification) before a no-deposit
    /// report against it is accepted (seconds).
    #[serde(default = "default_new_token_timeout")]
    pub new_token_timeout_secs: u64,
}

fn default_min_enable_timeout() -> u64 {
    ONE_HOUR_SECS
}

fn default_new_token_timeout() -> u64 {
    ONE_HOUR_SECS
}

impl VerificationParams {
    pub fn new(new_token_timeout_secs: u64) -> Self {
        Self {
            min_enable_timeout_secs: default_min_enable_timeout(),
            new_token_timeout_secs,
        }
    }
}

impl Default for VerificationParams {
    fn default() -> Self {
        Self {
            min_enable_timeout_secs: default_min_enable_timeout(),
            new_token_timeout_secs: default_new_token_timeout(),
        }
    }
}
