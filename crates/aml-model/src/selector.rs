//! Selectors: how a rule obtains a value.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::transform::TransformOp;

/// The three ways of obtaining a value.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorKind {
    /// A path query executed against the payload (`jsonPath`).
    PathQuery(String),
    /// A literal value (`constant`), returned verbatim.
    Constant(Value),
    /// A named entry of the variable table (`var`).
    Variable(String),
}

/// A selector plus the transform chain applied to whatever it resolves to.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawSelector")]
pub struct Selector {
    pub kind: SelectorKind,
    pub transform: Vec<TransformOp>,
}

impl Selector {
    pub fn path(path: impl Into<String>) -> Self {
        Self {
            kind: SelectorKind::PathQuery(path.into()),
            transform: Vec::new(),
        }
    }

    pub fn constant(value: Value) -> Self {
        Self {
            kind: SelectorKind::Constant(value),
            transform: Vec::new(),
        }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self {
            kind: SelectorKind::Variable(name.into()),
            transform: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_transform(mut self, transform: Vec<TransformOp>) -> Self {
        self.transform = transform;
        self
    }

    /// Returns the path query text when this is a path selector.
    pub fn path_query(&self) -> Option<&str> {
        match &self.kind {
            SelectorKind::PathQuery(path) => Some(path),
            _ => None,
        }
    }

    pub fn is_path_query(&self) -> bool {
        matches!(self.kind, SelectorKind::PathQuery(_))
    }

    pub fn has_unknown_ops(&self) -> bool {
        self.transform.iter().any(TransformOp::has_unknown)
    }
}

/// Wire shape of a selector before the variant is chosen.
#[derive(Deserialize)]
struct RawSelector {
    #[serde(rename = "jsonPath")]
    json_path: Option<String>,
    /// `Some(Value::Null)` for an explicit `constant: null`.
    #[serde(default, deserialize_with = "present")]
    constant: Option<Value>,
    var: Option<String>,
    #[serde(default)]
    transform: Vec<TransformOp>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl TryFrom<RawSelector> for Selector {
    type Error = String;

    fn try_from(raw: RawSelector) -> Result<Self, Self::Error> {
        // jsonPath takes precedence over constant, constant over var.
        let kind = if let Some(path) = raw.json_path {
            SelectorKind::PathQuery(path)
        } else if let Some(value) = raw.constant {
            SelectorKind::Constant(value)
        } else if let Some(name) = raw.var {
            SelectorKind::Variable(name)
        } else {
            return Err("selector needs one of `jsonPath`, `constant` or `var`".to_string());
        };
        Ok(Self {
            kind,
            transform: raw.transform,
        })
    }
}
