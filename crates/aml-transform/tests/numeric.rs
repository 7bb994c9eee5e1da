//! Tests for numeric coercion, rounding and clamping.

use aml_transform::{clamp, round, to_integer, to_number};
use proptest::prelude::*;
use serde_json::{Value, json};

#[test]
fn round_half_up() {
    assert_eq!(round(&json!(2.345), 2), json!(2.35));
    assert_eq!(round(&json!(2.344), 2), json!(2.34));
    assert_eq!(round(&json!("2.345"), 2), json!(2.35));
    assert_eq!(round(&json!(1.005), 2), json!(1.01));
}

#[test]
fn round_non_numeric_is_null() {
    assert_eq!(round(&json!("abc"), 2), Value::Null);
    assert_eq!(round(&Value::Null, 2), Value::Null);
    assert_eq!(round(&json!([1]), 2), Value::Null);
}

#[test]
fn to_number_coercions() {
    assert_eq!(to_number(&json!(12)), json!(12));
    assert_eq!(to_number(&json!(true)), json!(1));
    assert_eq!(to_number(&json!(false)), json!(0));
    assert_eq!(to_number(&json!("120")), json!(120));
    assert_eq!(to_number(&json!("12.5")), json!(12.5));
    assert_eq!(to_number(&json!("twelve")), Value::Null);
    assert_eq!(to_number(&json!({"n": 1})), Value::Null);
}

#[test]
fn to_number_keeps_type_distinct_from_strings() {
    assert_ne!(to_number(&json!("5")), json!("5"));
    assert_eq!(to_number(&json!("5")), json!(5));
}

#[test]
fn to_integer_truncates() {
    assert_eq!(to_integer(&json!(12.9)), json!(12));
    assert_eq!(to_integer(&json!(-12.9)), json!(-12));
    assert_eq!(to_integer(&json!("42.7")), json!(42));
    assert_eq!(to_integer(&json!(true)), json!(1));
    assert_eq!(to_integer(&json!("x")), Value::Null);
}

#[test]
fn clamp_bounds() {
    assert_eq!(clamp(&json!(500), Some(30.0), Some(300.0)), json!(300));
    assert_eq!(clamp(&json!(10), Some(30.0), Some(300.0)), json!(30));
    assert_eq!(clamp(&json!(42.5), Some(30.0), Some(300.0)), json!(42.5));
    assert_eq!(clamp(&json!(-5), None, Some(0.0)), json!(-5));
    assert_eq!(clamp(&json!("n/a"), Some(0.0), Some(1.0)), Value::Null);
}

proptest! {
    #[test]
    fn rounded_integers_are_unchanged(value in -1_000_000i64..1_000_000, places in 0i32..6) {
        prop_assert_eq!(round(&json!(value), places), json!(value));
    }

    #[test]
    fn clamp_stays_in_range(value in -1.0e6f64..1.0e6, low in -100.0f64..0.0, high in 0.0f64..100.0) {
        let clamped = clamp(&json!(value), Some(low), Some(high));
        let clamped = clamped.as_f64().unwrap();
        prop_assert!(clamped >= low && clamped <= high);
    }
}
