// SPDX-License-Identifier: MIT OR Apache-2.0
//! Container families and uniform field access over them.
//!
//! An anomaly can arrive as a plain JSON record or as a persistent map. Every
//! public operation resolves its input to a [`FieldAccess`] once, at the
//! boundary, and reads fields through it from then on.

use crate::AnomalyError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map as JsonMap, Value as JsonValue};

/// Immutable, structurally shared map used by the persistent family.
#[cfg(feature = "persistent")]
pub type PersistentMap = im::OrdMap<String, JsonValue>;

/// Whether persistent-map support was compiled in.
pub const PERSISTENT_MAPS_AVAILABLE: bool = cfg!(feature = "persistent");

// ---------------------------------------------------------------------------
// Family
// ---------------------------------------------------------------------------

/// Which container representation a value uses or an output should use.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum Family {
    /// `serde_json` objects.
    #[default]
    Plain,
    /// [`im::OrdMap`] records; requires the `persistent` feature.
    Persistent,
}

impl Family {
    /// Fails with [`AnomalyError::PersistentMapUnavailable`] when this family
    /// cannot be produced by the current build.
    pub fn ensure_available(self) -> Result<Self, AnomalyError> {
        match self {
            Self::Persistent if !PERSISTENT_MAPS_AVAILABLE => {
                Err(AnomalyError::PersistentMapUnavailable)
            }
            _ => Ok(self),
        }
    }
}

// ---------------------------------------------------------------------------
// FieldAccess
// ---------------------------------------------------------------------------

/// Read-only field access shared by both container families.
pub trait FieldAccess {
    /// Value stored under `key`, if any.
    fn field(&self, key: &str) -> Option<&JsonValue>;

    /// Copy of every entry as a plain JSON map.
    fn to_plain(&self) -> JsonMap<String, JsonValue>;
}

impl FieldAccess for JsonMap<String, JsonValue> {
    fn field(&self, key: &str) -> Option<&JsonValue> {
        self.get(key)
    }

    fn to_plain(&self) -> JsonMap<String, JsonValue> {
        self.clone()
    }
}

#[cfg(feature = "persistent")]
impl FieldAccess for PersistentMap {
    fn field(&self, key: &str) -> Option<&JsonValue> {
        self.get(key)
    }

    fn to_plain(&self) -> JsonMap<String, JsonValue> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

/// Any value handed to the anomaly operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A plain JSON value; only objects count as records.
    Plain(JsonValue),
    /// A persistent map record.
    #[cfg(feature = "persistent")]
    Persistent(PersistentMap),
}

impl Value {
    /// Builds a record of the requested family from a plain map.
    pub fn from_map(map: JsonMap<String, JsonValue>, family: Family) -> Result<Self, AnomalyError> {
        match family.ensure_available()? {
            Family::Plain => Ok(Self::Plain(JsonValue::Object(map))),
            #[cfg(feature = "persistent")]
            Family::Persistent => Ok(Self::Persistent(map.into_iter().collect())),
            #[cfg(not(feature = "persistent"))]
            Family::Persistent => Err(AnomalyError::PersistentMapUnavailable),
        }
    }

    /// Error-like plain record carrying the error's `Display` as `message`.
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut map = JsonMap::new();
        map.insert("message".into(), JsonValue::String(err.to_string()));
        Self::Plain(JsonValue::Object(map))
    }

    /// The family this value belongs to. Non-record plain values are `Plain`.
    pub fn family(&self) -> Family {
        match self {
            Self::Plain(_) => Family::Plain,
            #[cfg(feature = "persistent")]
            Self::Persistent(_) => Family::Persistent,
        }
    }

    /// Field accessor for records, `None` for anything else.
    pub fn record(&self) -> Option<&dyn FieldAccess> {
        match self {
            Self::Plain(JsonValue::Object(map)) => Some(map),
            Self::Plain(_) => None,
            #[cfg(feature = "persistent")]
            Self::Persistent(map) => Some(map),
        }
    }

    /// Whether this value is a record in either family.
    pub fn is_object_like(&self) -> bool {
        self.record().is_some()
    }

    /// Shorthand for reading one field of a record.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.record().and_then(|r| r.field(key))
    }

    /// Short name of the value kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Plain(JsonValue::Null) => "null",
            Self::Plain(JsonValue::Bool(_)) => "boolean",
            Self::Plain(JsonValue::Number(_)) => "number",
            Self::Plain(JsonValue::String(_)) => "string",
            Self::Plain(JsonValue::Array(_)) => "array",
            Self::Plain(JsonValue::Object(_)) => "object",
            #[cfg(feature = "persistent")]
            Self::Persistent(_) => "persistent map",
        }
    }

    /// Moves a record into `family`. Non-record values are returned as is.
    pub fn into_family(self, family: Family) -> Result<Self, AnomalyError> {
        if self.family() == family {
            return Ok(self);
        }
        match self {
            Self::Plain(JsonValue::Object(map)) => Self::from_map(map, family),
            #[cfg(feature = "persistent")]
            Self::Persistent(map) => Ok(Self::Plain(JsonValue::Object(map.to_plain()))),
            other => Ok(other),
        }
    }

    /// Plain JSON rendering of this value.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Plain(v) => v.clone(),
            #[cfg(feature = "persistent")]
            Self::Persistent(map) => JsonValue::Object(map.to_plain()),
        }
    }

    /// Record of the same family as `self` built from `map`.
    ///
    /// Infallible: a persistent sibling is only requested when `self` is
    /// already persistent.
    pub(crate) fn sibling(&self, map: JsonMap<String, JsonValue>) -> Self {
        match self {
            #[cfg(feature = "persistent")]
            Self::Persistent(_) => Self::Persistent(map.into_iter().collect()),
            Self::Plain(_) => Self::Plain(JsonValue::Object(map)),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Plain(v) => v.serialize(serializer),
            #[cfg(feature = "persistent")]
            Self::Persistent(map) => map.serialize(serializer),
        }
    }
}

impl From<JsonValue> for Value {
    fn from(v: JsonValue) -> Self {
        Self::Plain(v)
    }
}

impl From<JsonMap<String, JsonValue>> for Value {
    fn from(map: JsonMap<String, JsonValue>) -> Self {
        Self::Plain(JsonValue::Object(map))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Plain(JsonValue::String(s.to_owned()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Plain(JsonValue::String(s))
    }
}

#[cfg(feature = "persistent")]
impl From<PersistentMap> for Value {
    fn from(map: PersistentMap) -> Self {
        Self::Persistent(map)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
