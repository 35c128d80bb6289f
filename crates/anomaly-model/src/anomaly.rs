// SPDX-License-Identifier: MIT OR Apache-2.0
//! Strongly-typed anomaly with a fluent builder.

use crate::value::{Family, Value};
use crate::{AnomalyError, Category};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};
use std::fmt;

/// A standardized error record.
///
/// The dynamic operations ([`to_object`](crate::to_object),
/// [`to_response`](crate::to_response), ...) work on [`Value`]s; this type is
/// the convenient way to build one from Rust code.
///
/// ```
/// use anomaly_model::{Anomaly, Category, Family};
///
/// let anomaly = Anomaly::new(Category::NotFound)
///     .with_message("no such order")
///     .with_data("order_id", 42)
///     .with_reason("ORDER_MISSING");
/// let value = anomaly.into_value(Family::Plain).unwrap();
/// assert!(anomaly_model::is_anomaly(&value));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Anomaly {
    /// Broad classification.
    pub category: Category,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Extra fields merged into the serialized object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonMap<String, JsonValue>>,
    /// Caller-defined code used to look up a registered description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Anomaly {
    /// Bare anomaly of the given category.
    pub fn new(category: Category) -> Self {
        Self {
            category,
            message: None,
            data: None,
            reason: None,
        }
    }

    /// Bare [`Category::Fault`].
    pub fn fault() -> Self {
        Self::new(Category::Fault)
    }

    /// `Fault` carrying the error's `Display` output as its message.
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        Self::fault().with_message(err.to_string())
    }

    /// Set the message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Add one `data` entry.
    ///
    /// The value is converted via [`serde_json::to_value`]; if serialisation
    /// fails, the entry is silently skipped.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.data.get_or_insert_with(JsonMap::new).insert(key.into(), v);
        }
        self
    }

    /// Set the reason code.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Shorthand for `self.category.is_retriable()`.
    pub fn is_retriable(&self) -> bool {
        self.category.is_retriable()
    }

    /// Shorthand for `self.category.status_code()`.
    pub fn status_code(&self) -> u16 {
        self.category.status_code()
    }

    /// Record form of this anomaly; absent optionals are omitted.
    pub fn to_map(&self) -> JsonMap<String, JsonValue> {
        let mut map = JsonMap::new();
        map.insert("category".into(), self.category.as_str().into());
        if let Some(message) = &self.message {
            map.insert("message".into(), message.as_str().into());
        }
        if let Some(data) = &self.data {
            map.insert("data".into(), JsonValue::Object(data.clone()));
        }
        if let Some(reason) = &self.reason {
            map.insert("reason".into(), reason.as_str().into());
        }
        map
    }

    /// Convert into a dynamic [`Value`] of the requested family.
    pub fn into_value(self, family: Family) -> Result<Value, AnomalyError> {
        Value::from_map(self.to_map(), family)
    }

    /// Read a typed anomaly out of a dynamic value.
    ///
    /// Non-string `message`/`reason` fields and non-object `data` are
    /// dropped rather than rejected.
    pub fn from_value(value: &Value) -> Result<Self, AnomalyError> {
        let record = value.record().ok_or(AnomalyError::NotObjectLike {
            kind: value.kind(),
        })?;
        let category = match record.field("category") {
            Some(JsonValue::String(tag)) => tag.parse::<Category>()?,
            other => {
                return Err(AnomalyError::UnknownCategory {
                    value: other.map(JsonValue::to_string).unwrap_or_default(),
                });
            }
        };
        let string_field = |key: &str| {
            record
                .field(key)
                .and_then(JsonValue::as_str)
                .map(str::to_owned)
        };
        Ok(Self {
            category,
            message: string_field("message"),
            data: record.field("data").and_then(JsonValue::as_object).cloned(),
            reason: string_field("reason"),
        })
    }
}

impl From<Category> for Anomaly {
    fn from(category: Category) -> Self {
        Self::new(category)
    }
}

impl TryFrom<&Value> for Anomaly {
    type Error = AnomalyError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl From<Anomaly> for Value {
    fn from(anomaly: Anomaly) -> Self {
        Value::from(anomaly.to_map())
    }
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.category)?;
        if let Some(message) = &self.message {
            write!(f, " {message}")?;
        }
        if let Some(reason) = &self.reason {
            write!(f, " ({reason})")?;
        }
        Ok(())
    }
}

impl std::error::Error for Anomaly {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
