//! Transform pipeline.

use std::collections::BTreeSet;

use aml_model::{ConcatPart, TransformOp};
use aml_transform::{
    clamp, default_if_empty, lookup, parse_date_time, regex_extract, round, text_form, to_integer,
    to_number, to_zoned, trim, unit_convert,
};
use serde_json::Value;

use crate::selector::{self, Scope};

/// Threads `value` through `ops` in order.
pub fn apply(
    value: Value,
    ops: &[TransformOp],
    scope: &Scope<'_>,
    visiting: &mut BTreeSet<String>,
) -> Value {
    ops.iter()
        .fold(value, |current, op| apply_op(current, op, scope, visiting))
}

fn apply_op(
    value: Value,
    op: &TransformOp,
    scope: &Scope<'_>,
    visiting: &mut BTreeSet<String>,
) -> Value {
    match op {
        TransformOp::ToInteger => to_integer(&value),
        TransformOp::ToNumber => to_number(&value),
        TransformOp::Round { places } => round(&value, *places),
        TransformOp::Trim => trim(&value),
        TransformOp::DefaultIfEmpty { value: default } => default_if_empty(&value, default),
        TransformOp::UnitConvert { from, to } => unit_convert(&value, from, to),
        TransformOp::ParseDateTime => parse_date_time(&value),
        TransformOp::ToZoned { zone } => to_zoned(&value, zone),
        TransformOp::Clamp { min, max } => clamp(&value, *min, *max),
        TransformOp::Lookup { table } => lookup(&value, table),
        TransformOp::RegexExtract { pattern, group } => regex_extract(&value, pattern, *group),
        TransformOp::Concat { separator, parts } => concat(separator, parts, scope, visiting),
        TransformOp::Unknown => value,
    }
}

/// Joins the text forms of `parts`; parts resolving to null contribute "".
fn concat(
    separator: &str,
    parts: &[ConcatPart],
    scope: &Scope<'_>,
    visiting: &mut BTreeSet<String>,
) -> Value {
    let pieces: Vec<String> = parts
        .iter()
        .map(|part| match part {
            ConcatPart::Literal(text) => text.clone(),
            ConcatPart::Selector(selector) => {
                text_form(&selector::evaluate(selector, scope, visiting)).unwrap_or_default()
            }
        })
        .collect();
    Value::String(pieces.join(separator))
}
