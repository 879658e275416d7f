//! Canonical byte and text encodings for envelope payloads.
//!
//! `serialize`/`deserialize` carry any schema-validated JSON value to bytes
//! and back, byte-exact. `encode_text`/`decode_text` carry ciphertext bytes
//! to transport-safe text: un-padded base64url, so encoded fields survive
//! further structured or textual transports unescaped.

use crate::error::CryptoResult;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::Value;
use zeroize::Zeroizing;

/// Serializes a validated payload to canonical JSON bytes.
///
/// The buffer is zeroized on drop so plaintext does not outlive the seal
/// call that produced it.
pub fn serialize(value: &Value) -> CryptoResult<Zeroizing<Vec<u8>>> {
    Ok(Zeroizing::new(serde_json::to_vec(value)?))
}

/// Deserializes canonical JSON bytes back into a payload value.
pub fn deserialize(bytes: &[u8]) -> CryptoResult<Value> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Encodes bytes as un-padded base64url text. The empty input encodes to
/// the empty string.
pub fn encode_text(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decodes un-padded base64url text back to bytes.
pub fn decode_text(text: &str) -> CryptoResult<Vec<u8>> {
    Ok(URL_SAFE_NO_PAD.decode(text)?)
}
