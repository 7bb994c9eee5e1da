//! Selector evaluation.

use std::collections::{BTreeMap, BTreeSet};

use aml_model::{Selector, SelectorKind};
use serde_json::Value;
use tracing::trace;

use crate::pipeline;
use crate::query;

/// What selectors are evaluated against: the payload and the variable table.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    pub payload: &'a Value,
    pub variables: &'a BTreeMap<String, Selector>,
}

impl<'a> Scope<'a> {
    pub fn new(payload: &'a Value, variables: &'a BTreeMap<String, Selector>) -> Self {
        Self { payload, variables }
    }

    /// Resolves `selector` with a fresh set of in-flight variables.
    pub fn evaluate(&self, selector: &Selector) -> Value {
        evaluate(selector, self, &mut BTreeSet::new())
    }
}

/// Resolves `selector`, then applies its own transform chain.
///
/// `visiting` holds the variables currently being resolved; a variable that
/// refers back into it resolves to null instead of recursing.
pub fn evaluate(selector: &Selector, scope: &Scope<'_>, visiting: &mut BTreeSet<String>) -> Value {
    let resolved = match &selector.kind {
        SelectorKind::PathQuery(path) => query::select(scope.payload, path),
        SelectorKind::Constant(value) => value.clone(),
        SelectorKind::Variable(name) => resolve_variable(name, scope, visiting),
    };
    pipeline::apply(resolved, &selector.transform, scope, visiting)
}

fn resolve_variable(name: &str, scope: &Scope<'_>, visiting: &mut BTreeSet<String>) -> Value {
    if visiting.contains(name) {
        trace!(variable = name, "variable cycle");
        return Value::Null;
    }
    let Some(selector) = scope.variables.get(name) else {
        trace!(variable = name, "undefined variable");
        return Value::Null;
    };
    visiting.insert(name.to_string());
    let value = evaluate(selector, scope, visiting);
    visiting.remove(name);
    value
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn variables(entries: &[(&str, Selector)]) -> BTreeMap<String, Selector> {
        entries
            .iter()
            .map(|(name, selector)| ((*name).to_string(), selector.clone()))
            .collect()
    }

    #[test]
    fn variable_chain_resolves() {
        let payload = json!({"speed": 42});
        let vars = variables(&[
            ("a", Selector::variable("b")),
            ("b", Selector::path("$.speed")),
        ]);
        let scope = Scope::new(&payload, &vars);
        assert_eq!(scope.evaluate(&Selector::variable("a")), json!(42));
    }

    #[test]
    fn three_variable_cycle_is_null() {
        let payload = json!({});
        let vars = variables(&[
            ("a", Selector::variable("b")),
            ("b", Selector::variable("c")),
            ("c", Selector::variable("a")),
        ]);
        let scope = Scope::new(&payload, &vars);
        assert_eq!(scope.evaluate(&Selector::variable("a")), Value::Null);
    }

    #[test]
    fn visiting_set_is_cleared() {
        let payload = json!({"x": 1});
        let vars = variables(&[("x", Selector::path("$.x"))]);
        let scope = Scope::new(&payload, &vars);
        let mut visiting = BTreeSet::new();
        assert_eq!(evaluate(&Selector::variable("x"), &scope, &mut visiting), json!(1));
        assert!(visiting.is_empty());
    }

    #[test]
    fn same_variable_twice_is_not_a_cycle() {
        use aml_model::{ConcatPart, TransformOp};

        let payload = json!({"x": "v"});
        let vars = variables(&[("x", Selector::path("$.x"))]);
        let scope = Scope::new(&payload, &vars);
        let selector = Selector::constant(Value::Null).with_transform(vec![TransformOp::Concat {
            separator: "-".into(),
            parts: vec![
                ConcatPart::Selector(Selector::variable("x")),
                ConcatPart::Selector(Selector::variable("x")),
            ],
        }]);
        assert_eq!(scope.evaluate(&selector), json!("v-v"));
    }
}
