// SPDX-License-Identifier: MIT OR Apache-2.0
//! The fixed category taxonomy and its HTTP status mapping.

use crate::AnomalyError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Tag constants
// ---------------------------------------------------------------------------

/// Tag for [`Category::Unavailable`].
pub const UNAVAILABLE: &str = "Unavailable";
/// Misspelled alias of [`UNAVAILABLE`], kept for consumers of the old export.
///
/// Holds the correctly spelled tag; the misspelling itself is not a category.
#[deprecated(note = "use `UNAVAILABLE`")]
pub const UNAVALIABLE: &str = UNAVAILABLE;
/// Tag for [`Category::Interrupted`].
pub const INTERRUPTED: &str = "Interrupted";
/// Tag for [`Category::Incorrect`].
pub const INCORRECT: &str = "Incorrect";
/// Tag for [`Category::Forbidden`].
pub const FORBIDDEN: &str = "Forbidden";
/// Tag for [`Category::Unsupported`].
pub const UNSUPPORTED: &str = "Unsupported";
/// Tag for [`Category::NotFound`].
pub const NOT_FOUND: &str = "NotFound";
/// Tag for [`Category::Conflict`].
pub const CONFLICT: &str = "Conflict";
/// Tag for [`Category::Fault`].
pub const FAULT: &str = "Fault";
/// Tag for [`Category::Busy`].
pub const BUSY: &str = "Busy";

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Broad classification of an anomaly.
///
/// Serialises to its exact tag (`"NotFound"`, `"Busy"`, ...).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum Category {
    /// The callee is unreachable or not answering. Retriable.
    Unavailable,
    /// The callee was interrupted before completing. Retriable.
    Interrupted,
    /// The caller sent something malformed.
    Incorrect,
    /// The caller is not allowed to do this.
    Forbidden,
    /// The callee does not support this operation.
    Unsupported,
    /// The addressed entity does not exist.
    NotFound,
    /// The request conflicts with current state.
    Conflict,
    /// The callee failed; catch-all for unrecognised errors.
    Fault,
    /// The callee is overloaded. Retriable.
    Busy,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 9] = [
        Self::Unavailable,
        Self::Interrupted,
        Self::Incorrect,
        Self::Forbidden,
        Self::Unsupported,
        Self::NotFound,
        Self::Conflict,
        Self::Fault,
        Self::Busy,
    ];

    /// Stable tag for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unavailable => UNAVAILABLE,
            Self::Interrupted => INTERRUPTED,
            Self::Incorrect => INCORRECT,
            Self::Forbidden => FORBIDDEN,
            Self::Unsupported => UNSUPPORTED,
            Self::NotFound => NOT_FOUND,
            Self::Conflict => CONFLICT,
            Self::Fault => FAULT,
            Self::Busy => BUSY,
        }
    }

    /// HTTP status code reported for this category.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Unavailable => 503,
            Self::Interrupted => 500,
            Self::Incorrect => 400,
            Self::Forbidden => 403,
            Self::Unsupported => 501,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Fault => 500,
            Self::Busy => 500,
        }
    }

    /// Whether the condition is transient and the operation may be retried.
    pub fn is_retriable(&self) -> bool {
        matches!(self, Self::Unavailable | Self::Interrupted | Self::Busy)
    }

    /// Exact, case-sensitive lookup of a tag.
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == tag)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = AnomalyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| AnomalyError::UnknownCategory {
            value: s.to_owned(),
        })
    }
}

/// Whether `value` is exactly one of the nine category tags.
pub fn is_category(value: &str) -> bool {
    Category::parse(value).is_some()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
