use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("verification error: {0}")]
    Verification(#[from] parcel_verification::VerificationError),

    #[error("config error: {0}")]
    Config(String),
}
