//! Rule guards.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Boolean guard deciding whether a rule runs.
///
/// Only one combinator is honored per predicate object. When several keys
/// are present the first of `any`, `all`, `not` wins. Objects without a
/// recognized combinator, and non-object predicates, always pass.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "Value")]
pub enum Predicate {
    #[default]
    Always,
    Any(Vec<Atom>),
    All(Vec<Atom>),
    Not(Box<Predicate>),
}

/// Atomic check: the value at `path` deep-equals `equals`.
///
/// An atom missing either field never matches.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub path: Option<String>,
    pub equals: Option<Value>,
}

impl Atom {
    pub fn new(path: impl Into<String>, equals: Value) -> Self {
        Self {
            path: Some(path.into()),
            equals: Some(equals),
        }
    }
}

impl From<Value> for Atom {
    fn from(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return Self {
                path: None,
                equals: None,
            };
        };
        Self {
            path: map
                .remove("jsonPath")
                .and_then(|path| path.as_str().map(str::to_string)),
            equals: map.remove("equals"),
        }
    }
}

impl From<Value> for Predicate {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::from_object(map),
            _ => Self::Always,
        }
    }
}

impl Predicate {
    fn from_object(mut map: Map<String, Value>) -> Self {
        if let Some(Value::Array(atoms)) = map.remove("any") {
            return Self::Any(atoms.into_iter().map(Atom::from).collect());
        }
        if let Some(Value::Array(atoms)) = map.remove("all") {
            return Self::All(atoms.into_iter().map(Atom::from).collect());
        }
        if let Some(inner) = map.remove("not") {
            return Self::Not(Box::new(Self::from(inner)));
        }
        Self::Always
    }
}
