//! The envelope transform protocol.
//!
//! [`transform`] inspects the context variant and derives a validator whose
//! `validate` embeds the cryptographic step. The ordering is fixed:
//! plaintext is validated before it is sealed, and again after an envelope
//! is opened, before anything is returned to the caller. Retranslation is
//! the same discipline applied twice and is atomic from the caller's point
//! of view: a new envelope comes out, or an error does, never an opened
//! intermediate.

use crate::context::Context;
use crate::error::{EnvelopeError, TransformError, TransformResult};
use crate::shape::envelope_shape;
use cachet_crypto::{codec, open_plain, seal_plain, Envelope, PrivateKey, PublicKey};
use cachet_schema::Schema;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// A derived schema: the payload schema composed with the transformation
/// selected by the context.
pub struct Transformed {
    schema: Arc<dyn Schema>,
    mode: Mode,
}

enum Mode {
    /// No context: the payload schema unchanged.
    Identity,
    /// Plaintext in, envelope out.
    Seal { recipient: PublicKey },
    /// Envelope in, plaintext out.
    Open { recipient: PrivateKey },
    /// Envelope in, envelope under a different key out.
    Retranslate { open: PrivateKey, seal: PublicKey },
    /// Envelope shape check only.
    Shape,
}

/// Derives a validator from a payload schema and an optional context.
pub fn transform(schema: Arc<dyn Schema>, ctx: Option<Context>) -> Transformed {
    let mode = match ctx {
        None => Mode::Identity,
        Some(Context::Retranslate { open, seal }) => Mode::Retranslate { open, seal },
        Some(Context::Decipher { open }) => Mode::Open { recipient: open },
        Some(Context::Cipher { seal }) => Mode::Seal { recipient: seal },
        Some(Context::Repeat) => Mode::Shape,
    };
    Transformed { schema, mode }
}

impl Transformed {
    /// Runs the derived validation, performing whatever cryptographic step
    /// the mode embeds.
    pub async fn validate(&self, value: Value) -> TransformResult<Value> {
        match &self.mode {
            Mode::Identity => self
                .schema
                .validate(value)
                .await
                .map_err(TransformError::Validation),
            Mode::Seal { recipient } => {
                let envelope = seal_envelope(&self.schema, value, recipient).await?;
                envelope_to_value(&envelope)
            }
            Mode::Open { recipient } => {
                let envelope = envelope_from_value(value)?;
                open_envelope(&self.schema, &envelope, recipient).await
            }
            Mode::Retranslate { open, seal } => {
                let envelope = envelope_from_value(value)?;
                let resealed = retranslate_envelope(&self.schema, &envelope, open, seal).await?;
                envelope_to_value(&resealed)
            }
            Mode::Shape => match envelope_shape().validate(value).await {
                Ok(validated) => Ok(validated),
                Err(issues) => Err(EnvelopeError::Shape(
                    issues
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join("; "),
                )
                .into()),
            },
        }
    }
}

/// Validates a payload against its schema, then seals it for the recipient.
///
/// A payload that fails validation aborts the call before any cryptographic
/// work; no envelope is produced.
pub async fn seal_envelope(
    schema: &Arc<dyn Schema>,
    data: Value,
    recipient: &PublicKey,
) -> TransformResult<Envelope> {
    let validated = schema
        .validate(data)
        .await
        .map_err(TransformError::Validation)?;

    let plaintext = codec::serialize(&validated)?;
    let envelope = seal_plain(&plaintext, recipient)?;
    debug!(mode = "seal", "sealed payload into envelope");
    Ok(envelope)
}

/// Opens an envelope with the private key, then validates the plaintext
/// against the schema before returning it.
pub async fn open_envelope(
    schema: &Arc<dyn Schema>,
    envelope: &Envelope,
    recipient: &PrivateKey,
) -> TransformResult<Value> {
    let plaintext = open_plain(envelope, recipient)?;
    let payload = codec::deserialize(&plaintext)?;
    drop(plaintext);

    debug!(mode = "open", "opened envelope, validating payload");
    schema
        .validate(payload)
        .await
        .map_err(TransformError::Validation)
}

/// Opens an envelope with one key and reseals the validated plaintext for a
/// different recipient.
///
/// Either a new envelope comes out or an error does; the intermediate
/// plaintext is validated in between and never exposed to the caller.
pub async fn retranslate_envelope(
    schema: &Arc<dyn Schema>,
    envelope: &Envelope,
    open: &PrivateKey,
    seal: &PublicKey,
) -> TransformResult<Envelope> {
    let payload = open_envelope(schema, envelope, open).await?;
    let resealed = seal_envelope(schema, payload, seal).await?;
    debug!(mode = "retranslate", "retranslated envelope");
    Ok(resealed)
}

fn envelope_to_value(envelope: &Envelope) -> TransformResult<Value> {
    serde_json::to_value(envelope)
        .map_err(|e| TransformError::from(cachet_crypto::CryptoError::Serialization(e)))
}

fn envelope_from_value(value: Value) -> TransformResult<Envelope> {
    serde_json::from_value(value)
        .map_err(|e| EnvelopeError::Shape(e.to_string()).into())
}
