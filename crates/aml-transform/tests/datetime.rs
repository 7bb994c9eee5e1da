//! Tests for date/time normalization.

use aml_transform::{parse_date_time, to_zoned};
use serde_json::{Value, json};

#[test]
fn parse_offset_date_time_to_instant() {
    assert_eq!(
        parse_date_time(&json!("2024-01-15T10:30:00+01:00")),
        json!("2024-01-15T09:30:00Z")
    );
}

#[test]
fn parse_instant_passthrough() {
    assert_eq!(
        parse_date_time(&json!("2024-01-15T09:30:00Z")),
        json!("2024-01-15T09:30:00Z")
    );
}

#[test]
fn parse_keeps_fractional_seconds() {
    assert_eq!(
        parse_date_time(&json!("2024-01-15T09:30:00.250Z")),
        json!("2024-01-15T09:30:00.250Z")
    );
}

#[test]
fn parse_invalid_is_null() {
    assert_eq!(parse_date_time(&json!("15/01/2024")), Value::Null);
    assert_eq!(parse_date_time(&json!("2024-01-15")), Value::Null);
    assert_eq!(parse_date_time(&json!(1705311000)), Value::Null);
    assert_eq!(parse_date_time(&Value::Null), Value::Null);
}

#[test]
fn to_zoned_named_zone() {
    assert_eq!(
        to_zoned(&json!("2024-01-15T09:30:00Z"), "Europe/Berlin"),
        json!("2024-01-15T10:30:00+01:00")
    );
    assert_eq!(
        to_zoned(&json!("2024-07-15T09:30:00Z"), "Europe/Berlin"),
        json!("2024-07-15T11:30:00+02:00")
    );
}

#[test]
fn to_zoned_from_offset_input() {
    assert_eq!(
        to_zoned(&json!("2024-01-15T10:30:00+01:00"), "UTC"),
        json!("2024-01-15T09:30:00Z")
    );
}

#[test]
fn to_zoned_fixed_offset() {
    assert_eq!(
        to_zoned(&json!("2024-01-15T09:30:00Z"), "+05:30"),
        json!("2024-01-15T15:00:00+05:30")
    );
}

#[test]
fn to_zoned_failures_are_null() {
    assert_eq!(to_zoned(&json!("2024-01-15T09:30:00Z"), "Nowhere/City"), Value::Null);
    assert_eq!(to_zoned(&json!("yesterday"), "UTC"), Value::Null);
}
