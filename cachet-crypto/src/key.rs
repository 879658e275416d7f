//! Key material for the fixed envelope cipher suite.
//!
//! Thin newtype wrappers over the KEM's key types so the rest of the
//! workspace never names `hpke` directly. Ownership of key material stays
//! with the caller; nothing here stores or persists keys.

use crate::error::{CryptoError, CryptoResult};
use crate::suite::Kem;
use hpke::{Deserializable, Kem as KemTrait, Serializable};
use rand::rngs::OsRng;

/// Recipient public key, used to seal envelopes.
#[derive(Clone, Debug)]
pub struct PublicKey(pub(crate) <Kem as KemTrait>::PublicKey);

/// Recipient private key, used to open envelopes.
#[derive(Clone)]
pub struct PrivateKey(pub(crate) <Kem as KemTrait>::PrivateKey);

impl core::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("PrivateKey").field(&"<redacted>").finish()
    }
}

/// A public/private keypair for the fixed suite.
#[derive(Clone, Debug)]
pub struct KeyPair {
    pub public: PublicKey,
    pub private: PrivateKey,
}

impl KeyPair {
    /// Generates a fresh keypair from OS randomness.
    pub fn generate() -> Self {
        let (private, public) = Kem::gen_keypair(&mut OsRng);
        Self {
            public: PublicKey(public),
            private: PrivateKey(private),
        }
    }

    /// Derives a keypair deterministically from seed bytes: the same seed
    /// always yields the same keypair.
    pub fn derive(seed: &[u8]) -> CryptoResult<Self> {
        if seed.is_empty() {
            return Err(CryptoError::InvalidKey("empty derivation seed".into()));
        }
        let (private, public) = Kem::derive_keypair(seed);
        Ok(Self {
            public: PublicKey(public),
            private: PrivateKey(private),
        })
    }
}

impl PublicKey {
    /// SEC1 uncompressed point bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes().to_vec()
    }

    pub fn from_bytes(bytes: &[u8]) -> CryptoResult<Self> {
        <Kem as KemTrait>::PublicKey::from_bytes(bytes)
            .map(Self)
            .map_err(|e| CryptoError::InvalidKey(format!("malformed public key: {e}")))
    }
}

impl PrivateKey {
    /// Raw scalar bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes().to_vec()
    }

    pub fn from_bytes(bytes: &[u8]) -> CryptoResult<Self> {
        <Kem as KemTrait>::PrivateKey::from_bytes(bytes)
            .map(Self)
            .map_err(|e| CryptoError::InvalidKey(format!("malformed private key: {e}")))
    }
}
