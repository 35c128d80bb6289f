// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property tests for classification, coercion and serialization.

use anomaly_model::*;
use proptest::prelude::*;
use serde_json::{Map as JsonMap, Value as JsonValue, json};

// ── Strategies ──────────────────────────────────────────────────────

fn arb_category() -> impl Strategy<Value = Category> {
    proptest::sample::select(Category::ALL.to_vec())
}

fn arb_tag() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_category().prop_map(|c| c.as_str().to_string()),
        "[A-Za-z]{0,12}",
    ]
}

fn arb_scalar() -> impl Strategy<Value = JsonValue> {
    prop_oneof![
        Just(JsonValue::Null),
        any::<bool>().prop_map(JsonValue::from),
        any::<i64>().prop_map(JsonValue::from),
        "[a-z ]{0,16}".prop_map(JsonValue::from),
    ]
}

fn arb_data() -> impl Strategy<Value = JsonMap<String, JsonValue>> {
    proptest::collection::btree_map(
        prop_oneof![
            Just("error".to_string()),
            Just("message".to_string()),
            Just("category".to_string()),
            "[a-z]{1,8}",
        ],
        arb_scalar(),
        0..5,
    )
    .prop_map(|m| m.into_iter().collect())
}

fn arb_record() -> impl Strategy<Value = JsonMap<String, JsonValue>> {
    (
        proptest::option::of(arb_tag()),
        proptest::option::of("[a-z ]{0,20}"),
        proptest::option::of(arb_data()),
        proptest::option::of(prop_oneof![Just("KNOWN"), Just("UNKNOWN")]),
    )
        .prop_map(|(category, message, data, reason)| {
            let mut m = JsonMap::new();
            if let Some(c) = category {
                m.insert("category".into(), c.into());
            }
            if let Some(msg) = message {
                m.insert("message".into(), msg.into());
            }
            if let Some(d) = data {
                m.insert("data".into(), JsonValue::Object(d));
            }
            if let Some(r) = reason {
                m.insert("reason".into(), r.into());
            }
            m
        })
}

fn reasons() -> ReasonRegistry {
    [("KNOWN", "a known reason")].into_iter().collect()
}

// ── Properties ──────────────────────────────────────────────────────

proptest! {
    #[test]
    fn is_category_matches_parse(tag in arb_tag()) {
        prop_assert_eq!(is_category(&tag), Category::parse(&tag).is_some());
    }

    #[test]
    fn retriable_iff_transient(cat in arb_category()) {
        let expected = matches!(cat, Category::Unavailable | Category::Interrupted | Category::Busy);
        prop_assert_eq!(is_retriable(&Value::from(cat.as_str())), expected);
        prop_assert_eq!(is_retriable(&Value::from(Anomaly::new(cat))), expected);
    }

    #[test]
    fn to_anomaly_always_classifies(record in arb_record()) {
        let out = to_anomaly(Value::from(record));
        prop_assert!(is_anomaly(&out));
    }

    #[test]
    fn to_anomaly_is_identity_on_anomalies(record in arb_record()) {
        let v = Value::from(record);
        if is_anomaly(&v) {
            prop_assert_eq!(to_anomaly(v.clone()), v);
        }
    }

    #[test]
    fn object_always_has_retriable(record in arb_record()) {
        let out = to_object(&Value::from(record), &reasons(), Family::Plain).unwrap().to_json();
        prop_assert!(out["retriable"].is_boolean());
    }

    #[test]
    fn response_body_is_valid_json(record in arb_record()) {
        let resp = to_response(&Value::from(record), &reasons());
        let body = resp.body_json().unwrap();
        let category = body["category"].as_str().unwrap();
        prop_assert!(is_category(category));
        prop_assert_eq!(resp.status_code, Category::parse(category).unwrap().status_code());
    }
}

#[cfg(feature = "persistent")]
proptest! {
    #[test]
    fn families_serialize_identically(record in arb_record()) {
        let reasons = reasons();
        let plain = Value::from(record.clone());
        let persistent = Value::from(record.into_iter().collect::<PersistentMap>());

        prop_assert_eq!(is_anomaly(&plain), is_anomaly(&persistent));
        prop_assert_eq!(is_retriable(&plain), is_retriable(&persistent));
        prop_assert_eq!(
            to_object(&plain, &reasons, Family::Plain).unwrap(),
            to_object(&persistent, &reasons, Family::Plain).unwrap()
        );
        prop_assert_eq!(to_response(&plain, &reasons), to_response(&persistent, &reasons));
        prop_assert_eq!(to_anomaly(plain).to_json(), to_anomaly(persistent).to_json());
    }
}

#[test]
fn arb_record_example_shapes() {
    // Sanity check on the shape the strategies produce.
    let v = Value::from(json!({"category": "Busy", "reason": "KNOWN"}));
    let out = to_object(&v, &reasons(), Family::Plain).unwrap().to_json();
    assert_eq!(out["error"], json!("a known reason"));
}
