// SPDX-License-Identifier: MIT OR Apache-2.0
//! Output formatting utilities for the anomaly CLI.

use crate::commands::Classification;
use anomaly_model::{Category, Response, Value};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Supported output formats for CLI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Compact JSON (single line).
    Json,
    /// Pretty-printed JSON.
    JsonPretty,
    /// Human-readable text.
    Text,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Json => "json",
            Self::JsonPretty => "json-pretty",
            Self::Text => "text",
        };
        f.write_str(s)
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "json-pretty" | "json_pretty" | "pretty" => Ok(Self::JsonPretty),
            "text" => Ok(Self::Text),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

#[derive(Serialize)]
struct CategoryRow {
    category: Category,
    status_code: u16,
    retriable: bool,
}

fn json<T: Serialize>(value: &T, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::JsonPretty => serde_json::to_string_pretty(value),
        _ => serde_json::to_string(value),
    }
}

/// Every category with its status code and retriability.
pub fn format_categories(format: OutputFormat) -> serde_json::Result<String> {
    let rows: Vec<CategoryRow> = Category::ALL
        .into_iter()
        .map(|category| CategoryRow {
            category,
            status_code: category.status_code(),
            retriable: category.is_retriable(),
        })
        .collect();
    if format != OutputFormat::Text {
        return json(&rows, format);
    }
    let mut out = format!("{:<12} {:>6}  {}\n", "CATEGORY", "STATUS", "RETRIABLE");
    for row in rows {
        out.push_str(&format!(
            "{:<12} {:>6}  {}\n",
            row.category.as_str(),
            row.status_code,
            if row.retriable { "yes" } else { "no" }
        ));
    }
    Ok(out)
}

/// Result of the `classify` subcommand.
pub fn format_classification(c: &Classification, format: OutputFormat) -> serde_json::Result<String> {
    if format != OutputFormat::Text {
        return json(c, format);
    }
    let category = c.category.map_or("-", |cat| cat.as_str());
    Ok(format!(
        "anomaly:   {}\ncategory:  {category}\nretriable: {}\nfamily:    {:?}",
        c.is_anomaly, c.retriable, c.family
    ))
}

/// A dynamic value; text output is pretty JSON prefixed with its family.
pub fn format_value(value: &Value, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(format!(
            "# {:?}\n{}",
            value.family(),
            serde_json::to_string_pretty(value)?
        )),
        _ => json(value, format),
    }
}

/// A response; text output is the status line followed by the body.
pub fn format_response(response: &Response, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(format!("HTTP {}\n{}", response.status_code, response.body)),
        _ => json(response, format),
    }
}
