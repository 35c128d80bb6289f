// SPDX-License-Identifier: MIT OR Apache-2.0
//! Standard error records ("anomalies") and their HTTP rendering.
//!
//! Every anomaly carries a [`Category`] from a fixed set of nine, plus an
//! optional message, extra `data` fields and a `reason` code. This crate
//! classifies arbitrary values, normalizes them into anomalies, and turns
//! anomalies into caller-facing objects and `{statusCode, body}` responses.
//!
//! Anomalies can be plain JSON records or persistent maps (with the default
//! `persistent` feature); every operation treats both the same way.
//!
//! ```
//! use anomaly_model::{ReasonRegistry, Value, to_response};
//! use serde_json::json;
//!
//! let reasons = ReasonRegistry::new();
//! reasons.register("RATE_LIMITED", "Too many requests, slow down.");
//!
//! let anomaly = Value::from(json!({"category": "Busy", "reason": "RATE_LIMITED"}));
//! let response = to_response(&anomaly, &reasons);
//! assert_eq!(response.status_code, 500);
//! assert!(response.body.contains("slow down"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod anomaly;
mod category;
mod classify;
mod coerce;
mod error;
mod reason;
mod serialize;
mod value;

pub use anomaly::Anomaly;
#[allow(deprecated)]
pub use category::{
    BUSY, CONFLICT, Category, FAULT, FORBIDDEN, INCORRECT, INTERRUPTED, NOT_FOUND, UNAVAILABLE,
    UNAVALIABLE, UNSUPPORTED, is_category,
};
pub use classify::{category_of, is_anomaly, is_retriable};
pub use coerce::to_anomaly;
pub use error::AnomalyError;
pub use reason::{ReasonRegistry, register_reason};
pub use serialize::{Response, to_object, to_response, to_response_in};
#[cfg(feature = "persistent")]
pub use value::PersistentMap;
pub use value::{FieldAccess, Family, PERSISTENT_MAPS_AVAILABLE, Value};
