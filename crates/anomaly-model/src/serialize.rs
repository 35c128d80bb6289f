// SPDX-License-Identifier: MIT OR Apache-2.0
//! Anomaly → caller-facing object and anomaly → HTTP response.

use crate::classify::record_category;
use crate::value::{FieldAccess, Family, Value};
use crate::{Anomaly, AnomalyError, Category, ReasonRegistry};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};
use tracing::debug;

// ---------------------------------------------------------------------------
// Object
// ---------------------------------------------------------------------------

/// Serialize an anomaly into a flat descriptive object.
///
/// `data` entries are copied first; `category` and `message` from the
/// anomaly then override them (and are removed when the anomaly lacks
/// them). `retriable` is always set. `reason` is copied when present and, if
/// `reasons` has a description for it, `error` is set to that description.
/// Only string reasons are looked up; other non-null reasons are copied
/// without an `error`.
///
/// The input only has to be a record; its category is not validated.
pub fn to_object(
    anomaly: &Value,
    reasons: &ReasonRegistry,
    family: Family,
) -> Result<Value, AnomalyError> {
    let family = family.ensure_available()?;
    let record = anomaly.record().ok_or(AnomalyError::NotObjectLike {
        kind: anomaly.kind(),
    })?;
    Value::from_map(object_map(record, reasons), family)
}

fn object_map(record: &dyn FieldAccess, reasons: &ReasonRegistry) -> JsonMap<String, JsonValue> {
    let mut out = match record.field("data") {
        Some(JsonValue::Object(data)) => data.clone(),
        _ => JsonMap::new(),
    };
    copy_or_remove(&mut out, record, "category");
    copy_or_remove(&mut out, record, "message");
    let retriable = record_category(record).is_some_and(|c| c.is_retriable());
    out.insert("retriable".into(), JsonValue::Bool(retriable));

    match record.field("reason") {
        None | Some(JsonValue::Null) => {}
        Some(reason) => {
            out.insert("reason".into(), reason.clone());
            if let Some(description) = reason.as_str().and_then(|code| reasons.lookup(code)) {
                out.insert("error".into(), JsonValue::String(description));
            }
        }
    }
    out
}

fn copy_or_remove(out: &mut JsonMap<String, JsonValue>, record: &dyn FieldAccess, key: &str) {
    match record.field(key) {
        Some(v) => {
            out.insert(key.to_owned(), v.clone());
        }
        None => {
            out.remove(key);
        }
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// HTTP-style response for an anomaly, e.g. for an API gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// Status code derived from the category.
    pub status_code: u16,
    /// JSON-encoded serialized object.
    pub body: String,
}

impl Response {
    /// Parse the body back into JSON.
    pub fn body_json(&self) -> serde_json::Result<JsonValue> {
        serde_json::from_str(&self.body)
    }

    /// `{statusCode, body}` record of the requested family.
    pub fn into_value(self, family: Family) -> Result<Value, AnomalyError> {
        let mut map = JsonMap::new();
        map.insert("statusCode".into(), JsonValue::from(self.status_code));
        map.insert("body".into(), JsonValue::String(self.body));
        Value::from_map(map, family)
    }
}

/// Build the response for any value.
///
/// Values that are not anomalies are replaced by a bare
/// [`Category::Fault`] before serialization, so this never fails.
pub fn to_response(anomaly: &Value, reasons: &ReasonRegistry) -> Response {
    let classified = anomaly
        .record()
        .and_then(|record| record_category(record).map(|category| (record, category)));
    match classified {
        Some((record, category)) => build_response(category, record, reasons),
        None => {
            debug!(
                target: "anomaly.response",
                kind = anomaly.kind(),
                "value is not an anomaly; responding with Fault"
            );
            let fault = Anomaly::fault().to_map();
            build_response(Category::Fault, &fault, reasons)
        }
    }
}

/// [`to_response`] wrapped as a record of the requested family.
pub fn to_response_in(
    anomaly: &Value,
    reasons: &ReasonRegistry,
    family: Family,
) -> Result<Value, AnomalyError> {
    let family = family.ensure_available()?;
    to_response(anomaly, reasons).into_value(family)
}

fn build_response(
    category: Category,
    record: &dyn FieldAccess,
    reasons: &ReasonRegistry,
) -> Response {
    Response {
        status_code: category.status_code(),
        body: JsonValue::Object(object_map(record, reasons)).to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
