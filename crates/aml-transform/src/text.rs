//! Text-oriented transforms.

use std::collections::BTreeMap;

use regex::Regex;
use serde_json::Value;
use tracing::warn;

use crate::value::{is_empty, text_form};

/// `trim`: strips surrounding whitespace from strings; other values pass through.
pub fn trim(value: &Value) -> Value {
    match value {
        Value::String(text) => Value::String(text.trim().to_string()),
        other => other.clone(),
    }
}

/// `defaultIfEmpty`: substitutes `default` when the value is empty.
pub fn default_if_empty(value: &Value, default: &Value) -> Value {
    if is_empty(value) {
        default.clone()
    } else {
        value.clone()
    }
}

/// `lookup`: uses the value's text form as a key into `table`.
///
/// Missing keys resolve to null; hits resolve to the text form of the entry.
pub fn lookup(value: &Value, table: &BTreeMap<String, Value>) -> Value {
    let Some(key) = text_form(value) else {
        return Value::Null;
    };
    table
        .get(&key)
        .and_then(text_form)
        .map_or(Value::Null, Value::String)
}

/// `regexExtract`: returns capture `group` of the first match of `pattern`.
///
/// Group `0` is the whole match. No match, an out-of-range group, a group
/// that did not participate in the match, or an invalid pattern all yield null.
pub fn regex_extract(value: &Value, pattern: &str, group: usize) -> Value {
    let Some(text) = text_form(value) else {
        return Value::Null;
    };
    let regex = match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(error) => {
            warn!(pattern, %error, "invalid regexExtract pattern");
            return Value::Null;
        }
    };
    regex
        .captures(&text)
        .and_then(|captures| captures.get(group))
        .map_or(Value::Null, |matched| {
            Value::String(matched.as_str().to_string())
        })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn trim_only_touches_strings() {
        assert_eq!(trim(&json!("  B42 ")), json!("B42"));
        assert_eq!(trim(&json!(5)), json!(5));
        assert_eq!(trim(&Value::Null), Value::Null);
    }

    #[test]
    fn lookup_uses_text_form_of_numbers() {
        let mut table = BTreeMap::new();
        table.insert("1".to_string(), json!("one"));
        table.insert("2".to_string(), json!(2));
        assert_eq!(lookup(&json!(1), &table), json!("one"));
        assert_eq!(lookup(&json!("2"), &table), json!("2"));
        assert_eq!(lookup(&json!("3"), &table), Value::Null);
        assert_eq!(lookup(&Value::Null, &table), Value::Null);
    }
}
