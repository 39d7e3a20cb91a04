use chrono::Duration;
use thiserror::Error;

/// Error type for token issuance.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    /// `exp` is carried in whole seconds, so the lifetime must be too
    #[error("Token lifetime must be a positive whole number of seconds, got {0}")]
    InvalidLifetime(Duration),

    #[error("Token expiry is outside the representable time range")]
    ExpiryOutOfRange,
}

/// Reasons a presented token is rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("Token signature is invalid")]
    SignatureInvalid,

    #[error("Token is expired")]
    Expired,

    #[error("Token is malformed: {0}")]
    Malformed(String),
}
