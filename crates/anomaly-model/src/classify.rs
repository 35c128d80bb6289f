// SPDX-License-Identifier: MIT OR Apache-2.0
//! Classification predicates over dynamic values.

use crate::Category;
use crate::value::{FieldAccess, Value};
use serde_json::Value as JsonValue;

/// Category of a record whose `category` field holds a valid tag.
pub(crate) fn record_category(record: &dyn FieldAccess) -> Option<Category> {
    record
        .field("category")
        .and_then(JsonValue::as_str)
        .and_then(Category::parse)
}

/// Category of `value` if it is an anomaly.
pub fn category_of(value: &Value) -> Option<Category> {
    value.record().and_then(record_category)
}

/// Whether `value` is a record (in either family) with a valid `category`.
pub fn is_anomaly(value: &Value) -> bool {
    category_of(value).is_some()
}

/// Whether `value` names a retriable category.
///
/// Accepts either a raw category tag or an anomaly. Anything else, including
/// records without a valid category, is not retriable.
pub fn is_retriable(value: &Value) -> bool {
    let category = match value {
        Value::Plain(JsonValue::String(tag)) => Category::parse(tag),
        other => category_of(other),
    };
    category.is_some_and(|c| c.is_retriable())
}
