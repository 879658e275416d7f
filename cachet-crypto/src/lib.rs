//! Envelope cipher and codec for Cachet.
//!
//! Seals payload bytes to a recipient public key and opens them again with
//! the matching private key, using one fixed HPKE suite:
//!
//! - DHKEM(P-256, HKDF-SHA256) for key encapsulation
//! - HKDF-SHA256 for key derivation
//! - AES-128-GCM for authenticated encryption
//!
//! The suite is a process-level constant, not negotiated per call; two
//! processes exchanging envelopes must agree on it out of band. Keys are
//! passed in per call and never cached or persisted here.

pub mod codec;
pub mod envelope;
mod error;
mod key;
mod suite;

pub use envelope::{open_plain, seal_plain, Envelope};
pub use error::{CryptoError, CryptoResult};
pub use key::{KeyPair, PrivateKey, PublicKey};
