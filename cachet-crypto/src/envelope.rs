//! The envelope cipher: seals plaintext bytes to a recipient public key and
//! opens them again with the matching private key.
//!
//! Single-shot HPKE base mode with the suite fixed in `suite.rs`. This
//! module's job is shape mapping: KEM output into the `{ct, enc}` wire
//! record, HPKE errors into [`CryptoError`].

use crate::codec::{decode_text, encode_text};
use crate::error::{CryptoError, CryptoResult};
use crate::key::{PrivateKey, PublicKey};
use crate::suite::{Aead, Kdf, Kem, SUITE_INFO};
use hpke::{Deserializable, Kem as KemTrait, OpModeR, OpModeS, Serializable};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroizing;

/// Wire representation of a sealed payload.
///
/// `ct` is the AEAD ciphertext and `enc` the KEM encapsulated key material,
/// both as un-padded base64url text. Unknown fields are rejected on parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Envelope {
    pub ct: String,
    pub enc: String,
}

/// Seals plaintext bytes to a recipient public key.
///
/// Every call draws fresh ephemeral KEM material, so sealing the same
/// plaintext twice yields unrelated envelopes.
pub fn seal_plain(plaintext: &[u8], recipient: &PublicKey) -> CryptoResult<Envelope> {
    let (encapped, ciphertext) = hpke::single_shot_seal::<Aead, Kdf, Kem, _>(
        &OpModeS::Base,
        &recipient.0,
        SUITE_INFO,
        plaintext,
        b"",
        &mut OsRng,
    )
    .map_err(|e| CryptoError::Seal(e.to_string()))?;

    debug!(ct_len = ciphertext.len(), "sealed envelope");

    Ok(Envelope {
        ct: encode_text(&ciphertext),
        enc: encode_text(&encapped.to_bytes()),
    })
}

/// Opens an envelope with the recipient private key.
///
/// The returned plaintext buffer is zeroized on drop. Wrong-key and
/// tampered-ciphertext failures both surface as [`CryptoError::Open`].
pub fn open_plain(envelope: &Envelope, recipient: &PrivateKey) -> CryptoResult<Zeroizing<Vec<u8>>> {
    let ciphertext = decode_text(&envelope.ct)?;
    let enc = decode_text(&envelope.enc)?;

    let encapped = <Kem as KemTrait>::EncappedKey::from_bytes(&enc)
        .map_err(|e| CryptoError::InvalidKey(format!("malformed encapsulated key: {e}")))?;

    let plaintext = hpke::single_shot_open::<Aead, Kdf, Kem>(
        &OpModeR::Base,
        &recipient.0,
        &encapped,
        SUITE_INFO,
        &ciphertext,
        b"",
    )
    .map_err(|_| CryptoError::Open)?;

    debug!(ct_len = ciphertext.len(), "opened envelope");

    Ok(Zeroizing::new(plaintext))
}
