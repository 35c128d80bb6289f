// SPDX-License-Identifier: MIT OR Apache-2.0
//! Registry of human-readable descriptions for reason codes.

use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock};
use tracing::{debug, trace};

/// Mapping from reason code to description.
///
/// Entries are only ever added or overwritten, never removed. Registration
/// takes `&self`, so one registry can be shared (e.g. behind an `Arc`) by
/// the code that registers reasons and the code that serializes anomalies.
#[derive(Debug, Default)]
pub struct ReasonRegistry {
    descriptions: RwLock<HashMap<String, String>>,
}

impl ReasonRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry, created empty on first use.
    pub fn global() -> &'static ReasonRegistry {
        static GLOBAL: OnceLock<ReasonRegistry> = OnceLock::new();
        GLOBAL.get_or_init(ReasonRegistry::new)
    }

    /// Register `description` for `code`, replacing any previous one.
    pub fn register(&self, code: impl Into<String>, description: impl Into<String>) {
        let code = code.into();
        let mut map = self
            .descriptions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = map.insert(code.clone(), description.into()) {
            trace!(target: "anomaly.reasons", %code, %previous, "reason description replaced");
        } else {
            debug!(target: "anomaly.reasons", %code, "reason registered");
        }
    }

    /// Description registered for `code`, if any.
    pub fn lookup(&self, code: &str) -> Option<String> {
        self.descriptions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(code)
            .cloned()
    }

    /// Whether `code` has a description.
    pub fn contains(&self, code: &str) -> bool {
        self.descriptions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(code)
    }

    /// Number of registered codes.
    pub fn len(&self) -> usize {
        self.descriptions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered codes, sorted.
    pub fn codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = self
            .descriptions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        codes.sort();
        codes
    }
}

impl<C: Into<String>, D: Into<String>> Extend<(C, D)> for ReasonRegistry {
    fn extend<I: IntoIterator<Item = (C, D)>>(&mut self, iter: I) {
        for (code, description) in iter {
            self.register(code, description);
        }
    }
}

impl<C: Into<String>, D: Into<String>> FromIterator<(C, D)> for ReasonRegistry {
    fn from_iter<I: IntoIterator<Item = (C, D)>>(iter: I) -> Self {
        let mut registry = Self::new();
        registry.extend(iter);
        registry
    }
}

/// Register a description in the [global](ReasonRegistry::global) registry.
pub fn register_reason(code: impl Into<String>, description: impl Into<String>) {
    ReasonRegistry::global().register(code, description);
}
