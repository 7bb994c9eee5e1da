//! Transform operations.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::selector::Selector;

/// A single named, parameterized transform step.
///
/// Parsed from objects of the shape `{ "op": "<name>", ...params }`.
/// Ops this crate does not know deserialize to [`TransformOp::Unknown`],
/// which the pipeline treats as a no-op unless strict mode rejects it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum TransformOp {
    ToInteger,
    ToNumber,
    Round {
        #[serde(default)]
        places: i32,
    },
    Trim,
    DefaultIfEmpty {
        #[serde(default)]
        value: Value,
    },
    UnitConvert {
        #[serde(default)]
        from: String,
        #[serde(default)]
        to: String,
    },
    ParseDateTime,
    ToZoned {
        #[serde(default = "default_zone")]
        zone: String,
    },
    Clamp {
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
    },
    Lookup {
        #[serde(default)]
        table: BTreeMap<String, Value>,
    },
    RegexExtract {
        #[serde(default)]
        pattern: String,
        #[serde(default)]
        group: usize,
    },
    Concat {
        #[serde(default)]
        separator: String,
        #[serde(default)]
        parts: Vec<ConcatPart>,
    },
    #[serde(other)]
    Unknown,
}

fn default_zone() -> String {
    "UTC".to_string()
}

impl TransformOp {
    /// True for ops whose output is a date-time string.
    pub fn produces_date_time(&self) -> bool {
        matches!(self, Self::ParseDateTime | Self::ToZoned { .. })
    }

    /// True for ops whose output is numeric.
    pub fn produces_number(&self) -> bool {
        matches!(
            self,
            Self::ToInteger
                | Self::ToNumber
                | Self::Round { .. }
                | Self::UnitConvert { .. }
                | Self::Clamp { .. }
        )
    }

    /// True if this op, or a selector nested in a `concat`, is unknown.
    pub fn has_unknown(&self) -> bool {
        match self {
            Self::Unknown => true,
            Self::Concat { parts, .. } => parts.iter().any(|part| match part {
                ConcatPart::Literal(_) => false,
                ConcatPart::Selector(selector) => selector.has_unknown_ops(),
            }),
            _ => false,
        }
    }
}

/// One piece of a `concat` transform.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ConcatPart {
    /// Literal text, used verbatim.
    Literal(String),
    /// A selector evaluated against the payload.
    Selector(Selector),
}
