//! The fixed cipher-suite selection.

pub(crate) type Kem = hpke::kem::DhP256HkdfSha256;
pub(crate) type Kdf = hpke::kdf::HkdfSha256;
pub(crate) type Aead = hpke::aead::AesGcm128;

/// Domain-separation string mixed into every HPKE context.
pub(crate) const SUITE_INFO: &[u8] = b"cachet-envelope-v1";
