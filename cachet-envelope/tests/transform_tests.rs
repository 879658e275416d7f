use cachet_envelope::{
    envelope_shape, make_context, open_envelope, retranslate_envelope, seal_envelope, transform,
    Context, Envelope, KeyFragment, KeyPair, Schema, TransformError,
};
use cachet_schema::{object, string};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;

fn payload_schema() -> Arc<dyn Schema> {
    Arc::new(object().field("message", Arc::new(string())))
}

/// Same field, but requiring at least 100 characters.
fn stricter_schema() -> Arc<dyn Schema> {
    Arc::new(object().field("message", Arc::new(string().min_length(100))))
}

fn fragment(input: Option<&KeyPair>, output: Option<&KeyPair>) -> KeyFragment {
    KeyFragment {
        input: input.map(|kp| kp.private.clone()),
        output: output.map(|kp| kp.public.clone()),
    }
}

// ── Context factory ─────────────────────────────────────────────

#[test]
fn make_context_maps_every_fragment_shape() {
    let kp = KeyPair::generate();

    assert!(make_context(None).is_none());
    assert!(matches!(
        make_context(Some(KeyFragment::default())),
        Some(Context::Repeat)
    ));
    assert!(matches!(
        make_context(Some(fragment(Some(&kp), None))),
        Some(Context::Decipher { .. })
    ));
    assert!(matches!(
        make_context(Some(fragment(None, Some(&kp)))),
        Some(Context::Cipher { .. })
    ));
    assert!(matches!(
        make_context(Some(fragment(Some(&kp), Some(&kp)))),
        Some(Context::Retranslate { .. })
    ));
}

#[test]
fn fragment_from_bytes_roundtrips_keys() {
    let kp = KeyPair::generate();
    let built = KeyFragment::from_bytes(
        Some(&kp.private.to_bytes()),
        Some(&kp.public.to_bytes()),
    )
    .unwrap();

    assert!(matches!(
        make_context(Some(built)),
        Some(Context::Retranslate { .. })
    ));
}

#[test]
fn fragment_from_malformed_bytes_is_configuration_error() {
    let err = KeyFragment::from_bytes(Some(&[1, 2, 3]), None).unwrap_err();
    assert!(matches!(err, TransformError::Configuration(_)));
}

// ── Identity mode ───────────────────────────────────────────────

#[tokio::test]
async fn no_context_passes_payload_through() {
    let derived = transform(payload_schema(), None);
    let validated = derived.validate(json!({"message": "hi"})).await.unwrap();
    assert_eq!(validated, json!({"message": "hi"}));
}

#[tokio::test]
async fn no_context_still_validates() {
    let derived = transform(payload_schema(), None);
    let err = derived.validate(json!({"message": 123})).await.unwrap_err();
    assert!(matches!(err, TransformError::Validation(_)));
}

// ── Cipher mode ─────────────────────────────────────────────────

#[tokio::test]
async fn cipher_mode_produces_envelope_shaped_value() {
    let recipient = KeyPair::generate();
    let derived = transform(
        payload_schema(),
        Some(Context::Cipher {
            seal: recipient.public.clone(),
        }),
    );

    let sealed = derived.validate(json!({"message": "hi"})).await.unwrap();
    assert!(envelope_shape().validate(sealed).await.is_ok());
}

#[tokio::test]
async fn sealing_invalid_payload_fails_validation_before_crypto() {
    let recipient = KeyPair::generate();

    let err = seal_envelope(&payload_schema(), json!({"message": 123}), &recipient.public)
        .await
        .unwrap_err();

    match err {
        TransformError::Validation(issues) => {
            assert!(!issues.is_empty());
            assert_eq!(issues[0].path, vec!["message".to_string()]);
        }
        other => panic!("expected a validation error, got: {other}"),
    }
}

// ── Decipher mode ───────────────────────────────────────────────

#[tokio::test]
async fn seal_then_open_roundtrips() {
    let recipient = KeyPair::generate();
    let payload = json!({"message": "hi"});

    let envelope = seal_envelope(&payload_schema(), payload.clone(), &recipient.public)
        .await
        .unwrap();
    let opened = open_envelope(&payload_schema(), &envelope, &recipient.private)
        .await
        .unwrap();

    assert_eq!(opened, payload);
}

#[tokio::test]
async fn decipher_transform_roundtrips_through_values() {
    let recipient = KeyPair::generate();

    let sealer = transform(
        payload_schema(),
        Some(Context::Cipher {
            seal: recipient.public.clone(),
        }),
    );
    let opener = transform(
        payload_schema(),
        Some(Context::Decipher {
            open: recipient.private.clone(),
        }),
    );

    let sealed = sealer.validate(json!({"message": "hi"})).await.unwrap();
    let opened = opener.validate(sealed).await.unwrap();
    assert_eq!(opened, json!({"message": "hi"}));
}

#[tokio::test]
async fn opening_with_unrelated_key_is_envelope_error() {
    let intended = KeyPair::generate();
    let other = KeyPair::generate();

    let envelope = seal_envelope(&payload_schema(), json!({"message": "hi"}), &intended.public)
        .await
        .unwrap();
    let err = open_envelope(&payload_schema(), &envelope, &other.private)
        .await
        .unwrap_err();

    assert!(matches!(err, TransformError::Envelope(_)));
}

#[tokio::test]
async fn opened_payload_failing_stricter_schema_is_validation_error() {
    let recipient = KeyPair::generate();

    let envelope = seal_envelope(&payload_schema(), json!({"message": "hi"}), &recipient.public)
        .await
        .unwrap();
    let err = open_envelope(&stricter_schema(), &envelope, &recipient.private)
        .await
        .unwrap_err();

    // Decryption succeeded; the payload is the problem
    assert!(matches!(err, TransformError::Validation(_)));
}

#[tokio::test]
async fn open_transform_rejects_non_envelope_value() {
    let recipient = KeyPair::generate();
    let opener = transform(
        payload_schema(),
        Some(Context::Decipher {
            open: recipient.private.clone(),
        }),
    );

    let err = opener.validate(json!({"ct": 5})).await.unwrap_err();
    assert!(matches!(err, TransformError::Envelope(_)));
}

// ── Retranslate mode ────────────────────────────────────────────

#[tokio::test]
async fn retranslate_moves_envelope_between_keypairs() {
    let alice = KeyPair::generate();
    let bob = KeyPair::generate();
    let payload = json!({"message": "hi"});

    let for_alice = seal_envelope(&payload_schema(), payload.clone(), &alice.public)
        .await
        .unwrap();
    let for_bob = retranslate_envelope(
        &payload_schema(),
        &for_alice,
        &alice.private,
        &bob.public,
    )
    .await
    .unwrap();

    // Bob can open the retranslated envelope
    let opened = open_envelope(&payload_schema(), &for_bob, &bob.private)
        .await
        .unwrap();
    assert_eq!(opened, payload);

    // Alice no longer can
    let err = open_envelope(&payload_schema(), &for_bob, &alice.private)
        .await
        .unwrap_err();
    assert!(matches!(err, TransformError::Envelope(_)));
}

#[tokio::test]
async fn retranslate_transform_emits_envelope_shaped_value() {
    let alice = KeyPair::generate();
    let bob = KeyPair::generate();

    let for_alice = seal_envelope(&payload_schema(), json!({"message": "hi"}), &alice.public)
        .await
        .unwrap();

    let retranslator = transform(
        payload_schema(),
        Some(Context::Retranslate {
            open: alice.private.clone(),
            seal: bob.public.clone(),
        }),
    );
    let out = retranslator
        .validate(serde_json::to_value(&for_alice).unwrap())
        .await
        .unwrap();

    assert!(envelope_shape().validate(out.clone()).await.is_ok());

    let envelope: Envelope = serde_json::from_value(out).unwrap();
    let opened = open_envelope(&payload_schema(), &envelope, &bob.private)
        .await
        .unwrap();
    assert_eq!(opened, json!({"message": "hi"}));
}

#[tokio::test]
async fn retranslate_validates_the_intermediate_plaintext() {
    let alice = KeyPair::generate();
    let bob = KeyPair::generate();

    let for_alice = seal_envelope(&payload_schema(), json!({"message": "hi"}), &alice.public)
        .await
        .unwrap();
    let err = retranslate_envelope(&stricter_schema(), &for_alice, &alice.private, &bob.public)
        .await
        .unwrap_err();

    assert!(matches!(err, TransformError::Validation(_)));
}

#[tokio::test]
async fn retranslate_with_wrong_opening_key_fails() {
    let alice = KeyPair::generate();
    let bob = KeyPair::generate();

    let for_alice = seal_envelope(&payload_schema(), json!({"message": "hi"}), &alice.public)
        .await
        .unwrap();
    let err = retranslate_envelope(&payload_schema(), &for_alice, &bob.private, &bob.public)
        .await
        .unwrap_err();

    assert!(matches!(err, TransformError::Envelope(_)));
}

// ── Repeat mode ─────────────────────────────────────────────────

#[tokio::test]
async fn repeat_mode_passes_envelopes_through_unchanged() {
    let recipient = KeyPair::generate();
    let envelope = seal_envelope(&payload_schema(), json!({"message": "hi"}), &recipient.public)
        .await
        .unwrap();
    let value = serde_json::to_value(&envelope).unwrap();

    let repeater = transform(payload_schema(), Some(Context::Repeat));
    let out = repeater.validate(value.clone()).await.unwrap();

    assert_eq!(out, value);
}

#[tokio::test]
async fn repeat_mode_rejects_extra_fields() {
    let repeater = transform(payload_schema(), Some(Context::Repeat));

    let err = repeater
        .validate(json!({"ct": "abc", "enc": "def", "extra": 1}))
        .await
        .unwrap_err();
    assert!(matches!(err, TransformError::Envelope(_)));
}

#[tokio::test]
async fn repeat_mode_rejects_missing_and_mistyped_fields() {
    let repeater = transform(payload_schema(), Some(Context::Repeat));

    assert!(repeater.validate(json!({"ct": "abc"})).await.is_err());
    assert!(repeater
        .validate(json!({"ct": 1, "enc": "def"}))
        .await
        .is_err());
}

// ── Fixed-seed scenario ─────────────────────────────────────────

#[tokio::test]
async fn fixed_seed_scenario() {
    let keypair = KeyPair::derive(b"cachet test vector seed").unwrap();
    let schema = payload_schema();

    // Seal then open yields the payload back
    let envelope = seal_envelope(&schema, json!({"message": "hi"}), &keypair.public)
        .await
        .unwrap();
    let opened = open_envelope(&schema, &envelope, &keypair.private)
        .await
        .unwrap();
    assert_eq!(opened, json!({"message": "hi"}));

    // A number where a string is required never reaches the cipher
    let err = seal_envelope(&schema, json!({"message": 123}), &keypair.public)
        .await
        .unwrap_err();
    assert!(matches!(err, TransformError::Validation(_)));

    // A validly-decrypting envelope can still fail a stricter schema
    let err = open_envelope(&stricter_schema(), &envelope, &keypair.private)
        .await
        .unwrap_err();
    assert!(matches!(err, TransformError::Validation(_)));
}

// Property-based tests
mod proptests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn any_string_payload_roundtrips(message in ".*") {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                let recipient = KeyPair::generate();
                let payload = json!({"message": message});

                let envelope = seal_envelope(&payload_schema(), payload.clone(), &recipient.public)
                    .await
                    .unwrap();
                let opened: Value = open_envelope(&payload_schema(), &envelope, &recipient.private)
                    .await
                    .unwrap();
                assert_eq!(opened, payload);
            });
        }
    }
}
