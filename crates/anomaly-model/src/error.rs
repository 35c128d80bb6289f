// SPDX-License-Identifier: MIT OR Apache-2.0
//! Failures of the anomaly model itself, as opposed to the anomalies it models.

/// Errors raised by the strict operations of this crate.
///
/// Coercion ([`to_anomaly`](crate::to_anomaly)) and response building
/// ([`to_response`](crate::to_response)) never produce these for "wrong kind
/// of error" inputs; they normalize to [`Category::Fault`](crate::Category::Fault)
/// instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnomalyError {
    /// The value handed to [`to_object`](crate::to_object) is not a record.
    #[error("expected an object-like value, got {kind}")]
    NotObjectLike {
        /// Short name of the value kind that was received (e.g. `"number"`).
        kind: &'static str,
    },

    /// Persistent-map output was requested but support is not compiled in.
    #[error("persistent map output requested but the `persistent` feature is disabled")]
    PersistentMapUnavailable,

    /// A string did not match any of the fixed category tags.
    #[error("unknown anomaly category '{value}'")]
    UnknownCategory {
        /// The rejected tag.
        value: String,
    },
}
