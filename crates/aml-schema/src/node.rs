//! JSON Schema fragments produced by inference.

use aml_model::Constraint;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// JSON Schema draft used for exported documents.
pub const SCHEMA_DIALECT: &str = "https://json-schema.org/draft/2020-12/schema";

/// The `type` keyword of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonType {
    Object,
    Array,
    String,
    /// `["number", "string"]`: numeric leaves that transforms may also read from text.
    NumberOrString,
}

impl Serialize for JsonType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Object => serializer.serialize_str("object"),
            Self::Array => serializer.serialize_str("array"),
            Self::String => serializer.serialize_str("string"),
            Self::NumberOrString => ["number", "string"].serialize(serializer),
        }
    }
}

/// Object members in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties(Vec<(String, SchemaNode)>);

impl Properties {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, node)| node)
    }

    /// Returns the member `name`, appending an empty node if absent.
    pub fn entry(&mut self, name: &str) -> &mut SchemaNode {
        let index = match self.0.iter().position(|(key, _)| key == name) {
            Some(index) => index,
            None => {
                self.0.push((name.to_string(), SchemaNode::default()));
                self.0.len() - 1
            }
        };
        &mut self.0[index].1
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.0.iter().map(|(key, node)| (key.as_str(), node))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut SchemaNode)> {
        self.0.iter_mut().map(|(key, node)| (key.as_str(), node))
    }
}

impl Serialize for Properties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, node) in &self.0 {
            map.serialize_entry(key, node)?;
        }
        map.end()
    }
}

/// One level of an inferred schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<JsonType>,
    #[serde(skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// The declared constraints of the rule that last touched this leaf, verbatim.
    #[serde(rename = "x-aml-constraints", skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl SchemaNode {
    pub fn is_type(&self, kind: JsonType) -> bool {
        self.kind == Some(kind)
    }

    /// Maps constraints onto schema keywords.
    ///
    /// A keyword already present is kept; `declared` is always recorded.
    pub fn apply_constraints(&mut self, constraints: &[Constraint], declared: Vec<Value>) {
        for constraint in constraints {
            match constraint {
                Constraint::Range { min, max } => {
                    if self.minimum.is_none() {
                        self.minimum = min.map(aml_transform::number_value);
                    }
                    if self.maximum.is_none() {
                        self.maximum = max.map(aml_transform::number_value);
                    }
                }
                Constraint::Regex { pattern } => {
                    if self.pattern.is_none() {
                        self.pattern = Some(pattern.clone());
                    }
                }
                Constraint::Enum { values } => {
                    if self.enum_values.is_none() {
                        self.enum_values = Some(values.clone());
                    }
                }
                Constraint::MaxLength { value } => {
                    if self.max_length.is_none() {
                        self.max_length = Some(*value);
                    }
                }
                Constraint::Unknown => {}
            }
        }
        self.constraints = Some(declared);
    }
}

/// A complete payload schema document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaDocument {
    #[serde(rename = "$schema")]
    pub dialect: &'static str,
    #[serde(rename = "type")]
    pub kind: JsonType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub properties: Properties,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,
    #[serde(rename = "additionalProperties")]
    pub additional_properties: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl SchemaDocument {
    /// Wraps an inferred root node.
    pub fn new(root: SchemaNode, title: Option<String>, description: Option<String>) -> Self {
        Self {
            dialect: SCHEMA_DIALECT,
            kind: root.kind.unwrap_or(JsonType::Object),
            title,
            description,
            properties: root.properties,
            items: root.items,
            additional_properties: true,
            required: root.required,
        }
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
