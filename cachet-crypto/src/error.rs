//! Error types for the crypto layer.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur while sealing or opening envelopes.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("seal failed: {0}")]
    Seal(String),

    #[error("open failed (wrong key or tampered ciphertext)")]
    Open,

    #[error("invalid key material: {0}")]
    InvalidKey(String),

    #[error("invalid text encoding: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("payload serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
