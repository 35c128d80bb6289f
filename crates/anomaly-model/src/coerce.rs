// SPDX-License-Identifier: MIT OR Apache-2.0
//! Normalization of arbitrary values into anomalies.

use crate::classify::is_anomaly;
use crate::value::Value;
use crate::Anomaly;
use serde_json::Value as JsonValue;
use tracing::debug;

/// Normalize any value into a well-formed anomaly.
///
/// * Anomalies are returned as is.
/// * Error-like records (with a string `message`) become a `Fault` carrying
///   that message. A `message` of any other type is dropped.
/// * Anything else becomes a bare `Fault`.
///
/// The result is a persistent map when the input was one, otherwise a plain
/// record.
pub fn to_anomaly(value: Value) -> Value {
    if is_anomaly(&value) {
        return value;
    }
    let message = value.get("message").and_then(JsonValue::as_str);
    debug!(
        target: "anomaly.coerce",
        kind = value.kind(),
        error_like = message.is_some(),
        "normalizing value to Fault"
    );
    let mut fault = Anomaly::fault();
    fault.message = message.map(str::to_owned);
    value.sibling(fault.to_map())
}
