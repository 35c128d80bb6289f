// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shared command implementations for the anomaly CLI.
//!
//! These functions take already-parsed inputs so they can be tested without
//! spawning the binary.

use anomaly_config::AnomalyConfig;
use anomaly_model::{Category, Family, Value, category_of, is_anomaly, is_retriable};
use anyhow::{Context, Result, bail};
use schemars::schema_for;
use serde::Serialize;
use std::io::Read;

/// What `classify` reports about a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Whether the value is an anomaly.
    pub is_anomaly: bool,
    /// Its category, when it is one.
    pub category: Option<Category>,
    /// Whether it is retriable (anomaly or raw tag).
    pub retriable: bool,
    /// Container family of the value.
    pub family: Family,
}

/// Classify a value.
pub fn classify(value: &Value) -> Classification {
    Classification {
        is_anomaly: is_anomaly(value),
        category: category_of(value),
        retriable: is_retriable(value),
        family: value.family(),
    }
}

/// Read the raw input: `-` means stdin, anything else is used verbatim.
pub fn read_input(arg: &str) -> Result<String> {
    if arg != "-" {
        return Ok(arg.to_owned());
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("read value from stdin")?;
    Ok(buf)
}

/// Parse input text as JSON; text that is not JSON becomes a JSON string.
pub fn parse_value(text: &str) -> Value {
    let trimmed = text.trim();
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(v) => Value::from(v),
        Err(_) => Value::from(trimmed),
    }
}

/// Move record input into the persistent family when requested.
pub fn lift(value: Value, persistent: bool) -> Result<Value> {
    if !persistent {
        return Ok(value);
    }
    value
        .into_family(Family::Persistent)
        .context("convert input to a persistent map")
}

/// Parse a `CODE=DESCRIPTION` pair.
pub fn parse_reason_arg(arg: &str) -> Result<(String, String)> {
    match arg.split_once('=') {
        Some((code, description)) if !code.trim().is_empty() => {
            Ok((code.trim().to_owned(), description.to_owned()))
        }
        _ => bail!("invalid --reason '{arg}': expected CODE=DESCRIPTION"),
    }
}

/// Output family: the `--persistent` flag wins, then the config.
pub fn output_family(persistent: bool, config: &AnomalyConfig) -> Family {
    if persistent {
        Family::Persistent
    } else {
        config.output_family()
    }
}

/// JSON schema of the configuration file.
pub fn schema_json() -> Result<String> {
    let value = serde_json::to_value(schema_for!(AnomalyConfig))?;
    serde_json::to_string_pretty(&value).context("serialize schema")
}
