//! Capability contexts for envelope transforms.

use crate::error::{TransformError, TransformResult};
use cachet_crypto::{PrivateKey, PublicKey};

/// Capability bundle deciding which of seal/open a transform performs.
///
/// Built once per transformation request, usually via [`make_context`];
/// immutable and key-owning for the lifetime of the derived schema.
#[derive(Clone)]
pub enum Context {
    /// Seal only: plaintext in, envelope out.
    Cipher { seal: PublicKey },
    /// Open only: envelope in, plaintext out.
    Decipher { open: PrivateKey },
    /// Open with one key, reseal with another. The keys may belong to the
    /// same party or to two different recipients.
    Retranslate { open: PrivateKey, seal: PublicKey },
    /// No keys: assert the value is envelope-shaped and pass it through.
    Repeat,
}

/// Caller-supplied key material for [`make_context`].
///
/// `input` opens envelopes addressed to us; `output` seals envelopes for a
/// recipient. The core never generates or stores keys on the caller's
/// behalf.
#[derive(Clone, Default, Debug)]
pub struct KeyFragment {
    pub input: Option<PrivateKey>,
    pub output: Option<PublicKey>,
}

impl KeyFragment {
    /// Builds a fragment from raw key bytes, rejecting malformed material
    /// before any transform is constructed.
    pub fn from_bytes(input: Option<&[u8]>, output: Option<&[u8]>) -> TransformResult<Self> {
        let input = input
            .map(PrivateKey::from_bytes)
            .transpose()
            .map_err(|e| TransformError::Configuration(e.to_string()))?;
        let output = output
            .map(PublicKey::from_bytes)
            .transpose()
            .map_err(|e| TransformError::Configuration(e.to_string()))?;
        Ok(Self { input, output })
    }
}

/// Maps a key fragment onto the context variant its capabilities allow.
///
/// `None` means "no context" and yields `None` (the identity transform). An
/// empty-but-present fragment yields [`Context::Repeat`]. The two are
/// distinct on purpose: they select different dispatch rules.
pub fn make_context(fragment: Option<KeyFragment>) -> Option<Context> {
    let fragment = fragment?;
    Some(match (fragment.input, fragment.output) {
        (Some(open), Some(seal)) => Context::Retranslate { open, seal },
        (Some(open), None) => Context::Decipher { open },
        (None, Some(seal)) => Context::Cipher { seal },
        (None, None) => Context::Repeat,
    })
}
