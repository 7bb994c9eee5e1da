//! The top-level mapping document.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::MappingIssue;
use crate::rule::Rule;
use crate::selector::Selector;

/// The only `apiVersion` this engine processes without complaint.
pub const SUPPORTED_API_VERSION: &str = "aasx.map/v1";

/// A rule slot of the configured `rules` sequence.
///
/// Malformed entries keep their position so the engine can report them in
/// configuration order alongside the rules that did parse.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleEntry {
    Valid(Rule),
    Invalid(MappingIssue),
}

/// Submodel header handed to an external serializer.
///
/// The header is passed through untouched; only the pieces the mapping side
/// needs (`idShort` for naming, `initialElements` metadata) are interpreted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubmodelHeader {
    fields: Map<String, Value>,
}

impl SubmodelHeader {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn id_short(&self) -> Option<&str> {
        self.fields.get("idShort").and_then(Value::as_str)
    }

    /// Per-path element metadata from `initialElements[].path`.
    pub fn elements_by_path(&self) -> BTreeMap<String, Map<String, Value>> {
        let Some(Value::Array(elements)) = self.fields.get("initialElements") else {
            return BTreeMap::new();
        };
        elements
            .iter()
            .filter_map(|element| {
                let element = element.as_object()?;
                let path = element.get("path")?.as_str()?;
                Some((path.to_string(), element.clone()))
            })
            .collect()
    }
}

/// A parsed mapping configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MappingConfig {
    /// Text of `apiVersion`, if present and scalar.
    pub api_version: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub variables: BTreeMap<String, Selector>,
    pub rules: Vec<RuleEntry>,
    pub submodel: Option<SubmodelHeader>,
    /// Problems found while reading `variables`.
    pub issues: Vec<MappingIssue>,
}

impl MappingConfig {
    /// Builds a configuration from an already-parsed document.
    ///
    /// Never fails: a non-object document is an empty configuration, and
    /// rules or variables that do not parse are kept as recorded issues.
    pub fn from_value(document: &Value) -> Self {
        let Some(root) = document.as_object() else {
            return Self::default();
        };
        let mut config = Self {
            api_version: root.get("apiVersion").and_then(scalar_text),
            name: root.get("name").and_then(scalar_text),
            description: root.get("description").and_then(scalar_text),
            submodel: root
                .get("submodel")
                .and_then(Value::as_object)
                .map(|fields| SubmodelHeader::new(fields.clone())),
            ..Self::default()
        };
        if let Some(Value::Object(variables)) = root.get("variables") {
            for (name, raw) in variables {
                match serde_json::from_value::<Selector>(raw.clone()) {
                    Ok(selector) => {
                        config.variables.insert(name.clone(), selector);
                    }
                    Err(error) => config.issues.push(MappingIssue::MalformedVariable {
                        name: name.clone(),
                        reason: error.to_string(),
                    }),
                }
            }
        }
        if let Some(Value::Array(rules)) = root.get("rules") {
            config.rules = rules.iter().map(parse_rule).collect();
        }
        config
    }

    pub fn is_supported_version(&self) -> bool {
        self.api_version.as_deref() == Some(SUPPORTED_API_VERSION)
    }

    /// Iterates the rules that parsed successfully.
    pub fn valid_rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter_map(|entry| match entry {
            RuleEntry::Valid(rule) => Some(rule),
            RuleEntry::Invalid(_) => None,
        })
    }

    /// Base name for an output file: `name`, else the submodel `idShort`,
    /// else `mapping-output`, restricted to `[A-Za-z0-9._-]`.
    pub fn output_base_name(&self) -> String {
        const DEFAULT: &str = "mapping-output";
        let base = self
            .name
            .as_deref()
            .or_else(|| self.submodel.as_ref().and_then(SubmodelHeader::id_short))
            .filter(|base| !base.trim().is_empty())
            .unwrap_or(DEFAULT);
        let sanitized: String = base
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        if sanitized == "." || sanitized == ".." {
            DEFAULT.to_string()
        } else {
            sanitized
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn parse_rule(raw: &Value) -> RuleEntry {
    let Some(fields) = raw.as_object() else {
        return RuleEntry::Invalid(MappingIssue::RuleNotObject(raw.to_string()));
    };
    let target = fields
        .get("target")
        .and_then(Value::as_str)
        .filter(|target| !target.trim().is_empty());
    let Some(target) = target else {
        return RuleEntry::Invalid(MappingIssue::MissingTarget);
    };
    match Rule::from_value(raw) {
        Ok(rule) => RuleEntry::Valid(rule),
        Err(error) => RuleEntry::Invalid(MappingIssue::MalformedRule {
            target: target.to_string(),
            reason: error.to_string(),
        }),
    }
}
