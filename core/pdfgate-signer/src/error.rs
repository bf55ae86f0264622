//! Error types for URL signing.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignerError {
    /// The configured secret can't be turned into a signing key.
    #[error("invalid signing secret: {0}")]
    InvalidSecret(String),

    /// Signed URLs must expire in the future, within chrono's date range.
    #[error("signed URL expiry out of range: {0}s")]
    InvalidExpiry(i64),
}

/// Result type for signing operations.
pub type SignerResult<T> = Result<T, SignerError>;
