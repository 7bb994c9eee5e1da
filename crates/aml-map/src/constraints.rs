//! Constraint validation.

use aml_model::{Constraint, ConstraintKind};
use aml_transform::{coerce_f64, text_form};
use regex::Regex;
use serde_json::Value;
use tracing::warn;

/// Returns the kind of the first constraint `value` fails, if any.
///
/// Unknown constraint kinds pass.
pub fn validate(value: &Value, constraints: &[Constraint]) -> Option<ConstraintKind> {
    constraints
        .iter()
        .find(|constraint| !passes(value, constraint))
        .and_then(Constraint::kind)
}

fn passes(value: &Value, constraint: &Constraint) -> bool {
    match constraint {
        Constraint::Range { min, max } => coerce_f64(value).is_some_and(|number| {
            min.is_none_or(|min| number >= min) && max.is_none_or(|max| number <= max)
        }),
        Constraint::Regex { pattern } => match value {
            Value::String(text) => full_match(pattern, text),
            _ => false,
        },
        Constraint::Enum { values } => values.contains(value),
        Constraint::MaxLength { value: limit } => {
            text_form(value).is_some_and(|text| text.chars().count() <= *limit)
        }
        Constraint::Unknown => true,
    }
}

fn full_match(pattern: &str, text: &str) -> bool {
    match Regex::new(&format!("^(?:{pattern})$")) {
        Ok(regex) => regex.is_match(text),
        Err(error) => {
            warn!(pattern, %error, "invalid regex constraint");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn range_is_inclusive_and_open_ended() {
        let range = Constraint::Range {
            min: Some(0.0),
            max: Some(10.0),
        };
        assert_eq!(validate(&json!(10), std::slice::from_ref(&range)), None);
        assert_eq!(validate(&json!("0"), std::slice::from_ref(&range)), None);
        assert_eq!(
            validate(&json!(10.5), std::slice::from_ref(&range)),
            Some(ConstraintKind::Range)
        );
        assert_eq!(
            validate(&json!("abc"), &[range]),
            Some(ConstraintKind::Range)
        );
        let open = Constraint::Range {
            min: None,
            max: Some(1.0),
        };
        assert_eq!(validate(&json!(-1e9), &[open]), None);
    }

    #[test]
    fn declared_range_without_min_accepts_negatives() {
        let declared: Constraint = serde_json::from_value(json!({"kind": "range", "max": 100})).unwrap();
        assert_eq!(validate(&json!(-5), std::slice::from_ref(&declared)), None);
        assert_eq!(validate(&json!(150), &[declared]), Some(ConstraintKind::Range));
    }

    #[test]
    fn regex_is_full_match_on_strings() {
        let regex = Constraint::Regex {
            pattern: "[A-Z]{3}".into(),
        };
        assert_eq!(validate(&json!("ABC"), std::slice::from_ref(&regex)), None);
        assert_eq!(
            validate(&json!("ABCD"), std::slice::from_ref(&regex)),
            Some(ConstraintKind::Regex)
        );
        assert_eq!(
            validate(&json!(123), std::slice::from_ref(&regex)),
            Some(ConstraintKind::Regex)
        );
        let alternation = Constraint::Regex {
            pattern: "a|b".into(),
        };
        assert_eq!(validate(&json!("ab"), &[alternation]), Some(ConstraintKind::Regex));
    }

    #[test]
    fn enum_is_type_sensitive() {
        let allowed = Constraint::Enum {
            values: vec![json!(5), json!("on")],
        };
        assert_eq!(validate(&json!(5), std::slice::from_ref(&allowed)), None);
        assert_eq!(
            validate(&json!("5"), std::slice::from_ref(&allowed)),
            Some(ConstraintKind::Enum)
        );
    }

    #[test]
    fn max_length_counts_characters_and_rejects_null() {
        let max = Constraint::MaxLength { value: 3 };
        assert_eq!(validate(&json!("äöü"), std::slice::from_ref(&max)), None);
        assert_eq!(validate(&json!(1234), std::slice::from_ref(&max)), Some(ConstraintKind::MaxLength));
        assert_eq!(validate(&Value::Null, &[max]), Some(ConstraintKind::MaxLength));
    }

    #[test]
    fn first_failure_wins() {
        let constraints = vec![
            Constraint::Unknown,
            Constraint::MaxLength { value: 1 },
            Constraint::Enum { values: vec![] },
        ];
        assert_eq!(
            validate(&json!("long"), &constraints),
            Some(ConstraintKind::MaxLength)
        );
    }
}
