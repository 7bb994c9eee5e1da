//! Rule guard evaluation.

use aml_model::{Atom, Predicate};
use serde_json::Value;

use crate::query;

/// Evaluates a rule guard against the payload.
///
/// `Any` of nothing is false; `All` of nothing is true.
pub fn evaluate(predicate: &Predicate, payload: &Value) -> bool {
    match predicate {
        Predicate::Always => true,
        Predicate::Any(atoms) => atoms.iter().any(|atom| matches(atom, payload)),
        Predicate::All(atoms) => atoms.iter().all(|atom| matches(atom, payload)),
        Predicate::Not(inner) => !evaluate(inner, payload),
    }
}

/// An atom matches when its path resolves and the result deep-equals `equals`.
fn matches(atom: &Atom, payload: &Value) -> bool {
    let (Some(path), Some(expected)) = (&atom.path, &atom.equals) else {
        return false;
    };
    query::find(payload, path).is_some_and(|actual| actual == *expected)
}
