//! Mapping rules.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::constraint::Constraint;
use crate::predicate::Predicate;
use crate::selector::Selector;
use crate::transform::TransformOp;

/// One configured rule: where to write, when, and how to compute the value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// Slash-delimited output path, e.g. `Process/Duration`.
    pub target: String,
    #[serde(default)]
    pub when: Predicate,
    #[serde(default)]
    pub source: Option<Selector>,
    /// Composite object fields, in configured order.
    #[serde(default, deserialize_with = "ordered_selectors")]
    pub project: Option<Vec<(String, Selector)>>,
    #[serde(default)]
    pub fallback: Vec<Selector>,
    /// Applied after source/fallback resolution; ignored for `project`.
    #[serde(default)]
    pub transform: Vec<TransformOp>,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
    /// `constraints` exactly as written in the document.
    #[serde(skip)]
    pub declared_constraints: Vec<Value>,
}

impl Rule {
    /// Creates a rule that copies `source` to `target`.
    pub fn new(target: impl Into<String>, source: Selector) -> Self {
        Self {
            target: target.into(),
            when: Predicate::Always,
            source: Some(source),
            project: None,
            fallback: Vec::new(),
            transform: Vec::new(),
            constraints: Vec::new(),
            declared_constraints: Vec::new(),
        }
    }

    /// Parses a rule object, keeping the declared constraint list verbatim.
    pub fn from_value(raw: &Value) -> Result<Self, serde_json::Error> {
        let mut rule: Self = serde_json::from_value(raw.clone())?;
        if let Some(Value::Array(declared)) = raw.get("constraints") {
            rule.declared_constraints = declared.clone();
        }
        Ok(rule)
    }

    /// The constraint list as declared; rules built in code fall back to the typed form.
    pub fn constraint_annotation(&self) -> Vec<Value> {
        if !self.declared_constraints.is_empty() {
            return self.declared_constraints.clone();
        }
        self.constraints
            .iter()
            .filter_map(|constraint| serde_json::to_value(constraint).ok())
            .collect()
    }

    /// True if any fallback is something other than a path query.
    pub fn has_non_path_fallback(&self) -> bool {
        self.fallback.iter().any(|selector| !selector.is_path_query())
    }

    /// True if the rule references a transform op or constraint kind that is not supported.
    pub fn has_unknown_ops(&self) -> bool {
        self.transform.iter().any(TransformOp::has_unknown)
            || self.constraints.contains(&Constraint::Unknown)
            || self.source.as_ref().is_some_and(Selector::has_unknown_ops)
            || self.fallback.iter().any(Selector::has_unknown_ops)
            || self
                .project
                .iter()
                .flatten()
                .any(|(_, selector)| selector.has_unknown_ops())
    }
}

fn ordered_selectors<'de, D>(deserializer: D) -> Result<Option<Vec<(String, Selector)>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(fields) = Option::<Map<String, Value>>::deserialize(deserializer)? else {
        return Ok(None);
    };
    fields
        .into_iter()
        .map(|(field, raw)| {
            serde_json::from_value(raw)
                .map(|selector| (field.clone(), selector))
                .map_err(|error| D::Error::custom(format!("project field `{field}`: {error}")))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}
