//! Generic helpers over JSON values.

use serde_json::{Number, Value};

/// Largest integer magnitude an `f64` represents exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Returns true for null, blank strings, empty arrays and empty objects.
///
/// Numbers and booleans are never empty, including `0` and `false`.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Returns the text form of a value, or `None` for null.
///
/// Scalars render as their literal text (`5`, `2.5`, `true`); arrays and
/// objects render as compact JSON.
pub fn text_form(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

/// Builds a JSON number from a float, emitting an integer when the value is integral.
///
/// Non-finite floats have no JSON representation and become null.
pub fn number_value(value: f64) -> Value {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
        return Value::from(value as i64);
    }
    Number::from_f64(value).map_or(Value::Null, Value::Number)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_values() {
        assert!(is_empty(&Value::Null));
        assert!(is_empty(&json!("   ")));
        assert!(is_empty(&json!([])));
        assert!(is_empty(&json!({})));
        assert!(!is_empty(&json!(0)));
        assert!(!is_empty(&json!(false)));
        assert!(!is_empty(&json!(" x ")));
    }

    #[test]
    fn text_forms() {
        assert_eq!(text_form(&json!(5)), Some("5".to_string()));
        assert_eq!(text_form(&json!(2.5)), Some("2.5".to_string()));
        assert_eq!(text_form(&json!(true)), Some("true".to_string()));
        assert_eq!(text_form(&json!({"a": 1})), Some("{\"a\":1}".to_string()));
        assert_eq!(text_form(&Value::Null), None);
    }

    #[test]
    fn integral_floats_become_integers() {
        assert_eq!(number_value(212.0), json!(212));
        assert_eq!(number_value(-0.0), json!(0));
        assert_eq!(number_value(0.5), json!(0.5));
        assert_eq!(number_value(f64::NAN), Value::Null);
    }
}
