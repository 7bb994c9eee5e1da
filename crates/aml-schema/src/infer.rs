//! Payload schema inference from a mapping configuration.
//!
//! The walk never looks at a payload. Every path query a rule can read from
//! (directly or through variables) contributes its structure to the schema;
//! transform chains decide leaf types and rule constraints become keywords.

use std::collections::{BTreeMap, BTreeSet};

use aml_model::{MappingConfig, Rule, Selector, SelectorKind, TransformOp};
use tracing::{debug, trace};

use crate::node::{JsonType, SchemaDocument, SchemaNode};
use crate::tokenizer::{Token, tokenize};

/// Leaf type implied by a transform chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypeHint {
    Text,
    Number,
    DateTime,
}

impl TypeHint {
    /// Date-time ops take precedence over numeric ones.
    fn from_ops<'a>(ops: impl IntoIterator<Item = &'a TransformOp>) -> Self {
        let mut hint = Self::Text;
        for op in ops {
            if op.produces_date_time() {
                return Self::DateTime;
            }
            if op.produces_number() {
                hint = Self::Number;
            }
        }
        hint
    }

    fn leaf_type(self) -> JsonType {
        match self {
            Self::Number => JsonType::NumberOrString,
            Self::Text | Self::DateTime => JsonType::String,
        }
    }
}

/// Parent path tokens -> required member names, in first-seen order.
type RequiredAt = BTreeMap<Vec<Token>, Vec<String>>;

/// Builds the complete schema document for the payloads `config` expects.
pub fn export_payload_schema(config: &MappingConfig) -> SchemaDocument {
    SchemaDocument::new(
        infer(config),
        config.name.clone(),
        config.description.clone(),
    )
}

/// Infers the root schema node for `config`.
pub fn infer(config: &MappingConfig) -> SchemaNode {
    let mut root = SchemaNode {
        kind: Some(JsonType::Object),
        ..SchemaNode::default()
    };
    let mut required_at = RequiredAt::new();

    for rule in config.valid_rules() {
        for selector in candidate_selectors(rule) {
            let mut paths = Vec::new();
            resolve_paths(selector, &config.variables, &mut BTreeSet::new(), &mut paths);
            let hint = TypeHint::from_ops(&selector.transform);
            for path in paths {
                let tokens = tokenize(path);
                if tokens.is_empty() {
                    trace!(path, "path contributes no structure");
                    continue;
                }
                add_path(&mut root, &tokens, hint, rule);
                if is_required_source(rule, selector) {
                    mark_required(&mut required_at, &tokens);
                }
            }
        }
    }

    apply_required(&mut root, &required_at, &mut Vec::new());
    debug!(
        properties = root.properties.len(),
        "inferred payload schema"
    );
    root
}

/// Every selector a rule declares: `source`, then each `fallback`, then the
/// `project` members.
fn candidate_selectors(rule: &Rule) -> impl Iterator<Item = &Selector> {
    rule.source
        .iter()
        .chain(&rule.fallback)
        .chain(rule.project.iter().flatten().map(|(_, selector)| selector))
}

/// Collects the path queries `selector` reads, following variables.
fn resolve_paths<'a>(
    selector: &'a Selector,
    variables: &'a BTreeMap<String, Selector>,
    visiting: &mut BTreeSet<String>,
    paths: &mut Vec<&'a str>,
) {
    match &selector.kind {
        SelectorKind::PathQuery(path) => paths.push(path),
        SelectorKind::Constant(_) => {}
        SelectorKind::Variable(name) => {
            if visiting.contains(name) {
                return;
            }
            let Some(target) = variables.get(name) else {
                return;
            };
            visiting.insert(name.clone());
            resolve_paths(target, variables, visiting, paths);
            visiting.remove(name);
        }
    }
}

/// A leaf is required only when it is what the rule's `source` reads and
/// nothing but other path queries could stand in for it.
fn is_required_source(rule: &Rule, selector: &Selector) -> bool {
    rule.project.is_none()
        && !rule.has_non_path_fallback()
        && rule
            .source
            .as_ref()
            .is_some_and(|source| std::ptr::eq(source, selector))
}

fn add_path(root: &mut SchemaNode, tokens: &[Token], hint: TypeHint, rule: &Rule) {
    let Some(last) = tokens.len().checked_sub(1) else {
        return;
    };
    let mut current = root;
    for (index, token) in tokens.iter().enumerate() {
        let default_kind = if index == last {
            hint.leaf_type()
        } else {
            JsonType::Object
        };
        current = match token {
            Token::Field(name) => {
                let child = current.properties.entry(name);
                let kind = child.kind.get_or_insert(default_kind);
                if index != last && *kind != JsonType::Object {
                    *kind = JsonType::Object;
                }
                child
            }
            Token::ArrayWildcard => {
                current.kind = Some(JsonType::Array);
                let items: &mut SchemaNode = current.items.get_or_insert_with(Box::default);
                if items.kind.is_none() {
                    items.kind = Some(default_kind);
                }
                items
            }
        };
    }
    if hint == TypeHint::DateTime {
        current.format = Some("date-time".to_string());
    }
    if !rule.constraints.is_empty() {
        current.apply_constraints(&rule.constraints, rule.constraint_annotation());
    }
}

/// Marks the leaf and every field above it as required at its parent.
///
/// Paths ending in an array level mark nothing.
fn mark_required(required_at: &mut RequiredAt, tokens: &[Token]) {
    if !matches!(tokens.last(), Some(Token::Field(_))) {
        return;
    }
    for (depth, token) in tokens.iter().enumerate() {
        if let Token::Field(name) = token {
            let names = required_at.entry(tokens[..depth].to_vec()).or_default();
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
    }
}

/// Attaches `required` lists, descending through object members and array items.
fn apply_required(node: &mut SchemaNode, required_at: &RequiredAt, path: &mut Vec<Token>) {
    if !node.properties.is_empty() {
        if let Some(names) = required_at.get(path.as_slice()) {
            node.required = names.clone();
        }
        for (name, child) in node.properties.iter_mut() {
            path.push(Token::Field(name.to_string()));
            apply_required(child, required_at, path);
            path.pop();
        }
    }
    if node.is_type(JsonType::Array)
        && let Some(items) = node.items.as_deref_mut()
    {
        path.push(Token::ArrayWildcard);
        apply_required(items, required_at, path);
        path.pop();
    }
}
