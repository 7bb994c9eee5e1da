//! Value constraints checked before a rule writes its output.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A declared constraint on a rule's final value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Constraint {
    /// Inclusive numeric bounds; a missing bound is open.
    Range {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    /// Full-string regular expression match.
    Regex { pattern: String },
    /// Exact, type-sensitive membership.
    Enum {
        #[serde(default)]
        values: Vec<Value>,
    },
    /// Maximum length of the text form, in characters.
    MaxLength { value: usize },
    #[serde(other)]
    Unknown,
}

impl Constraint {
    /// The kind of a known constraint; `None` for unknown kinds.
    pub fn kind(&self) -> Option<ConstraintKind> {
        match self {
            Self::Range { .. } => Some(ConstraintKind::Range),
            Self::Regex { .. } => Some(ConstraintKind::Regex),
            Self::Enum { .. } => Some(ConstraintKind::Enum),
            Self::MaxLength { .. } => Some(ConstraintKind::MaxLength),
            Self::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    Range,
    Regex,
    Enum,
    MaxLength,
}

impl ConstraintKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Range => "range",
            Self::Regex => "regex",
            Self::Enum => "enum",
            Self::MaxLength => "maxLength",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
