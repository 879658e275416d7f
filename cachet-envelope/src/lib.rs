//! Schema-sealed envelope encryption.
//!
//! Makes encryption a property of the schema: a payload schema plus an
//! optional [`Context`] derive a validator that seals, opens, or retranslates
//! envelopes as part of validation. The context variant picks the mode:
//!
//! - no context — the payload schema unchanged
//! - [`Context::Cipher`] — validate plaintext, then seal it into an envelope
//! - [`Context::Decipher`] — open an envelope, then validate the plaintext
//! - [`Context::Retranslate`] — open with one key, validate, reseal with
//!   another; plaintext never reaches the caller
//! - [`Context::Repeat`] — assert envelope shape, no cryptography
//!
//! Plaintext validation always happens before sealing and after opening;
//! that ordering is fixed and cannot be skipped or reordered by callers.

mod context;
mod error;
mod shape;
mod transform;

pub use cachet_crypto::{Envelope, KeyPair, PrivateKey, PublicKey};
pub use cachet_schema::{Issue, Schema};
pub use context::{make_context, Context, KeyFragment};
pub use error::{EnvelopeError, TransformError, TransformResult};
pub use shape::envelope_shape;
pub use transform::{
    open_envelope, retranslate_envelope, seal_envelope, transform, Transformed,
};
