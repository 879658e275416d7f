//! Structural validator for the envelope wire shape.

use cachet_schema::{object, string, Schema};
use std::sync::Arc;

/// The canonical `{ct: string, enc: string}` validator.
///
/// Strict: extra fields are rejected. This is what the `Repeat` mode runs,
/// and what a pipeline stage uses to assert "this is envelope-shaped"
/// without holding any keys.
pub fn envelope_shape() -> Arc<dyn Schema> {
    Arc::new(
        object()
            .field("ct", Arc::new(string()))
            .field("enc", Arc::new(string()))
            .strict(),
    )
}
