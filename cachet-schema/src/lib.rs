//! Declarative payload validation for Cachet.
//!
//! A [`Schema`] maps an untyped JSON value to a validated value or a list of
//! [`Issue`]s. Schemas are plain composable values: the envelope layer wraps
//! a payload schema with cryptographic steps without ever mutating it.
//!
//! The combinators in this crate cover the value universe the envelope
//! protocol works over: strings (with minimum length), numbers, booleans,
//! and objects with per-field schemas and optional strict unknown-field
//! rejection.

mod issue;
mod validators;

pub use issue::Issue;
pub use validators::{
    boolean, number, object, string, BooleanSchema, NumberSchema, ObjectSchema, StringSchema,
};

use async_trait::async_trait;
use serde_json::Value;

/// A validator from an untyped value to a validated value.
///
/// Validation is async because schemas may consult external resources;
/// combinators in this crate complete immediately.
#[async_trait]
pub trait Schema: Send + Sync {
    /// Validates `value`, returning the (possibly reshaped) value on success
    /// or every issue found on failure. Implementations never coerce types
    /// and never drop fields silently.
    async fn validate(&self, value: Value) -> Result<Value, Vec<Issue>>;
}
