//! Error taxonomy for envelope transforms.

use cachet_crypto::CryptoError;
use cachet_schema::Issue;
use thiserror::Error;

/// Result type for transform operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Errors surfaced by [`transform`](crate::transform),
/// [`seal_envelope`](crate::seal_envelope), and
/// [`open_envelope`](crate::open_envelope).
///
/// The variants separate "the data has the wrong shape" (`Validation`) from
/// "the key or transport is the problem" (`Envelope`) from caller misuse
/// (`Configuration`). Nothing is retried internally; every failure surfaces
/// to the immediate caller, and a failed seal or open yields neither an
/// envelope nor plaintext.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The payload failed schema validation, either before sealing or after
    /// opening. Carries the validator's full issue list.
    #[error("payload failed validation: {}", format_issues(.0))]
    Validation(Vec<Issue>),

    #[error("envelope error: {0}")]
    Envelope(#[from] EnvelopeError),

    /// Synchronous caller misuse, e.g. malformed key bytes in a fragment.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

/// Cryptographic or structural envelope failure.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// The value is not a `{ct, enc}` envelope.
    #[error("malformed envelope: {0}")]
    Shape(String),

    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

impl From<CryptoError> for TransformError {
    fn from(err: CryptoError) -> Self {
        Self::Envelope(EnvelopeError::Crypto(err))
    }
}

fn format_issues(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
