//! Mapping engine implementation.

use std::collections::BTreeSet;

use aml_model::{
    MappingConfig, MappingIssue, MappingOptions, MappingResult, Rule, RuleEntry, UnknownOpPolicy,
};
use aml_transform::is_empty;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::constraints;
use crate::pipeline;
use crate::predicate;
use crate::selector::Scope;
use crate::serializer::SubmodelSerializer;
use crate::tree::put_deep;

/// Applies a mapping configuration to payloads.
///
/// The engine holds no per-run state; every call to [`MappingEngine::map`]
/// builds its output from scratch.
#[derive(Default)]
pub struct MappingEngine {
    options: MappingOptions,
    serializer: Option<Box<dyn SubmodelSerializer>>,
}

impl MappingEngine {
    pub fn new(options: MappingOptions) -> Self {
        Self {
            options,
            serializer: None,
        }
    }

    /// Registers the serializer used when the configuration carries a
    /// `submodel` header.
    #[must_use]
    pub fn with_serializer(mut self, serializer: impl SubmodelSerializer + 'static) -> Self {
        self.serializer = Some(Box::new(serializer));
        self
    }

    pub fn options(&self) -> &MappingOptions {
        &self.options
    }

    pub fn has_serializer(&self) -> bool {
        self.serializer.is_some()
    }

    /// Maps `payload` through `config`.
    ///
    /// Never fails: problems are recorded in the result's error list and the
    /// output holds whatever the remaining rules produced.
    pub fn map(&self, config: &MappingConfig, payload: &Value) -> MappingResult {
        let mut issues = Vec::new();
        let mut output = Map::new();

        if !config.is_supported_version() {
            let found = config.api_version.clone().unwrap_or_default();
            warn!(api_version = %found, "unsupported apiVersion");
            issues.push(MappingIssue::UnsupportedApiVersion(found));
        }
        issues.extend(config.issues.iter().cloned());

        if config.rules.is_empty() {
            issues.push(MappingIssue::NoRules);
            return MappingResult::new(Value::Object(output), &issues);
        }

        let scope = Scope::new(payload, &config.variables);
        for entry in &config.rules {
            match entry {
                RuleEntry::Valid(rule) => self.apply_rule(rule, &scope, &mut output, &mut issues),
                RuleEntry::Invalid(issue) => issues.push(issue.clone()),
            }
        }

        let tree = Value::Object(output);
        let output = self.serialize(config, tree, &mut issues);
        debug!(errors = issues.len(), "mapping finished");
        MappingResult::new(output, &issues)
    }

    fn apply_rule(
        &self,
        rule: &Rule,
        scope: &Scope<'_>,
        output: &mut Map<String, Value>,
        issues: &mut Vec<MappingIssue>,
    ) {
        if self.options.unknown_ops == UnknownOpPolicy::Reject && rule.has_unknown_ops() {
            issues.push(MappingIssue::UnsupportedOperation {
                target: rule.target.clone(),
            });
            return;
        }
        if !predicate::evaluate(&rule.when, scope.payload) {
            debug!(rule = %rule.target, "rule skipped by predicate");
            return;
        }

        let value = rule_value(rule, scope);

        if let Some(kind) = constraints::validate(&value, &rule.constraints) {
            debug!(rule = %rule.target, %kind, "constraint failed");
            issues.push(MappingIssue::ConstraintFailed {
                target: rule.target.clone(),
                kind,
            });
            return;
        }
        put_deep(output, &rule.target, value);
    }

    fn serialize(
        &self,
        config: &MappingConfig,
        tree: Value,
        issues: &mut Vec<MappingIssue>,
    ) -> Value {
        let (Some(header), Some(serializer)) = (&config.submodel, &self.serializer) else {
            return tree;
        };
        match serializer.serialize(header, &header.elements_by_path(), &tree) {
            Ok(document) => document,
            Err(error) => {
                warn!(%error, "submodel serialization failed");
                issues.push(MappingIssue::SerializationFailed(error.to_string()));
                tree
            }
        }
    }
}

/// Computes a rule's value before constraints are checked.
fn rule_value(rule: &Rule, scope: &Scope<'_>) -> Value {
    if let Some(project) = &rule.project {
        if rule.source.is_some() {
            debug!(rule = %rule.target, "project takes precedence over source");
        }
        let fields = project
            .iter()
            .map(|(field, selector)| (field.clone(), scope.evaluate(selector)))
            .collect();
        return Value::Object(fields);
    }

    let mut value = rule
        .source
        .as_ref()
        .map_or(Value::Null, |source| scope.evaluate(source));
    if is_empty(&value) {
        for fallback in &rule.fallback {
            value = scope.evaluate(fallback);
            if !is_empty(&value) {
                break;
            }
        }
    }
    pipeline::apply(value, &rule.transform, scope, &mut BTreeSet::new())
}
