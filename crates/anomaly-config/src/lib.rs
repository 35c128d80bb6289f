// SPDX-License-Identifier: MIT OR Apache-2.0
//! Configuration loading, validation, and merging for the anomaly model.
//!
//! This crate provides [`AnomalyConfig`], a reason catalog plus output and
//! logging settings, together with helpers for loading from TOML files,
//! applying environment overrides, merging overlays, and producing advisory
//! [`ConfigWarning`]s.
#![deny(unsafe_code)]
#![warn(missing_docs)]

use anomaly_model::{Family, PERSISTENT_MAPS_AVAILABLE, ReasonRegistry};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration loading or validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The requested configuration file was not found.
    #[error("config file not found: {path}")]
    FileNotFound {
        /// Path that was requested.
        path: String,
    },

    /// The file could not be parsed as valid TOML.
    #[error("failed to parse config: {reason}")]
    ParseError {
        /// Human-readable parse error detail.
        reason: String,
    },

    /// Semantic validation failed (one or more problems).
    #[error("config validation failed: {reasons:?}")]
    ValidationError {
        /// Individual validation failure messages.
        reasons: Vec<String>,
    },

    /// Two configs describe the same reason code differently.
    #[error("merge conflict: {reason}")]
    MergeConflict {
        /// Description of the conflict.
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

/// Advisory-level issues that do not prevent operation but deserve attention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A recommended optional field is missing.
    MissingOptionalField {
        /// Name of the missing field.
        field: String,
        /// Why it matters.
        hint: String,
    },
    /// A reason code maps to an empty description.
    EmptyDescription {
        /// The reason code.
        code: String,
    },
    /// A reason code is not written in `SCREAMING_SNAKE_CASE`.
    UnconventionalCode {
        /// The reason code.
        code: String,
    },
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigWarning::MissingOptionalField { field, hint } => {
                write!(f, "missing optional field '{field}': {hint}")
            }
            ConfigWarning::EmptyDescription { code } => {
                write!(f, "reason '{code}' has an empty description")
            }
            ConfigWarning::UnconventionalCode { code } => {
                write!(f, "reason code '{code}' is not SCREAMING_SNAKE_CASE")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Config types
// ---------------------------------------------------------------------------

/// Top-level settings for anomaly serialization.
///
/// ```toml
/// log_level = "info"
/// output = "Plain"
///
/// [reasons]
/// CUSTOM_ERROR = "Something bad happened!"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct AnomalyConfig {
    /// Log level override (e.g. `"debug"`, `"info"`, `"warn"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Container family used for serialized output when none is requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Family>,

    /// Reason code → human-readable description.
    #[serde(default)]
    pub reasons: BTreeMap<String, String>,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            log_level: Some("info".into()),
            output: None,
            reasons: BTreeMap::new(),
        }
    }
}

impl AnomalyConfig {
    /// Output family, defaulting to [`Family::Plain`].
    pub fn output_family(&self) -> Family {
        self.output.unwrap_or_default()
    }

    /// Register every configured reason into `registry`. Returns the count.
    pub fn install_reasons(&self, registry: &ReasonRegistry) -> usize {
        for (code, description) in &self.reasons {
            registry.register(code.as_str(), description.as_str());
        }
        debug!(target: "anomaly.config", count = self.reasons.len(), "reasons installed");
        self.reasons.len()
    }

    /// Fresh registry holding the configured reasons.
    pub fn reason_registry(&self) -> ReasonRegistry {
        let registry = ReasonRegistry::new();
        self.install_reasons(&registry);
        registry
    }
}

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Recognised log levels.
const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Environment variable overriding `log_level`.
pub const ENV_LOG_LEVEL: &str = "ANOMALY_LOG_LEVEL";

/// Environment variable overriding `output` (`plain` or `persistent`).
pub const ENV_OUTPUT: &str = "ANOMALY_OUTPUT";

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load an [`AnomalyConfig`] from an optional TOML file path.
///
/// * If `path` is `Some`, reads and parses the file.
/// * If `path` is `None`, returns [`AnomalyConfig::default()`].
///
/// Environment variable overrides are applied on top in both cases.
pub fn load_config(path: Option<&Path>) -> Result<AnomalyConfig, ConfigError> {
    let mut config = match path {
        Some(p) => {
            let content = std::fs::read_to_string(p).map_err(|_| ConfigError::FileNotFound {
                path: p.display().to_string(),
            })?;
            parse_toml(&content)?
        }
        None => AnomalyConfig::default(),
    };
    apply_env_overrides(&mut config);
    Ok(config)
}

/// Parse a TOML string into an [`AnomalyConfig`].
pub fn parse_toml(content: &str) -> Result<AnomalyConfig, ConfigError> {
    toml::from_str::<AnomalyConfig>(content).map_err(|e| ConfigError::ParseError {
        reason: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Env overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides from the process environment.
///
/// Recognised variables:
/// - `ANOMALY_LOG_LEVEL`
/// - `ANOMALY_OUTPUT`
pub fn apply_env_overrides(config: &mut AnomalyConfig) {
    apply_overrides_from(config, |key| std::env::var(key).ok());
}

/// Apply overrides using `lookup` in place of the process environment.
pub fn apply_overrides_from(config: &mut AnomalyConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(val) = lookup(ENV_LOG_LEVEL) {
        config.log_level = Some(val);
    }
    if let Some(val) = lookup(ENV_OUTPUT) {
        match parse_family(&val) {
            Some(family) => config.output = Some(family),
            None => warn!(
                target: "anomaly.config",
                value = %val,
                "ignoring {ENV_OUTPUT}: expected 'plain' or 'persistent'"
            ),
        }
    }
}

/// Case-insensitive family name.
pub fn parse_family(value: &str) -> Option<Family> {
    match value.trim().to_ascii_lowercase().as_str() {
        "plain" => Some(Family::Plain),
        "persistent" => Some(Family::Persistent),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn is_screaming_snake(code: &str) -> bool {
    !code.is_empty()
        && !code.starts_with('_')
        && code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

/// Validate a parsed configuration, returning advisory warnings.
///
/// Hard errors (unknown log level, empty reason codes, persistent output
/// without persistent-map support) are returned as a
/// [`ConfigError::ValidationError`]; soft issues come back as warnings.
pub fn validate_config(config: &AnomalyConfig) -> Result<Vec<ConfigWarning>, ConfigError> {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<ConfigWarning> = Vec::new();

    if let Some(ref level) = config.log_level {
        if !VALID_LOG_LEVELS.contains(&level.as_str()) {
            errors.push(format!("invalid log_level '{level}'"));
        }
    }

    if config.output == Some(Family::Persistent) && !PERSISTENT_MAPS_AVAILABLE {
        errors.push("output 'Persistent' requires persistent map support".into());
    }

    for (code, description) in &config.reasons {
        if code.trim().is_empty() {
            errors.push("reason code must not be empty".into());
            continue;
        }
        if !is_screaming_snake(code) {
            warnings.push(ConfigWarning::UnconventionalCode { code: code.clone() });
        }
        if description.trim().is_empty() {
            warnings.push(ConfigWarning::EmptyDescription { code: code.clone() });
        }
    }

    if config.reasons.is_empty() {
        warnings.push(ConfigWarning::MissingOptionalField {
            field: "reasons".into(),
            hint: "serialized anomalies will never carry an 'error' description".into(),
        });
    }

    if errors.is_empty() {
        Ok(warnings)
    } else {
        Err(ConfigError::ValidationError { reasons: errors })
    }
}

// ---------------------------------------------------------------------------
// Merging
// ---------------------------------------------------------------------------

/// Merge two configurations.  Values in `overlay` take precedence over `base`.
///
/// Reason tables are combined; on code collisions the overlay entry wins.
pub fn merge_configs(base: AnomalyConfig, overlay: AnomalyConfig) -> AnomalyConfig {
    let mut reasons = base.reasons;
    reasons.extend(overlay.reasons);
    AnomalyConfig {
        log_level: overlay.log_level.or(base.log_level),
        output: overlay.output.or(base.output),
        reasons,
    }
}

/// Like [`merge_configs`], but two different descriptions for the same code
/// are a [`ConfigError::MergeConflict`].
pub fn merge_configs_strict(
    base: AnomalyConfig,
    overlay: AnomalyConfig,
) -> Result<AnomalyConfig, ConfigError> {
    for (code, description) in &overlay.reasons {
        if let Some(existing) = base.reasons.get(code) {
            if existing != description {
                return Err(ConfigError::MergeConflict {
                    reason: format!(
                        "reason '{code}' described as both '{existing}' and '{description}'"
                    ),
                });
            }
        }
    }
    Ok(merge_configs(base, overlay))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
