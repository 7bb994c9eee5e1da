//! Numeric coercion utilities.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::{Number, Value};

use crate::value::number_value;

/// Parses decimal text into a JSON number, returning None for invalid or non-finite text.
///
/// Integer text stays integral (`"120"` becomes `120`, not `120.0`).
pub fn parse_number(text: &str) -> Option<Number> {
    if text.is_empty() {
        return None;
    }
    if let Ok(integer) = text.parse::<i64>() {
        return Some(Number::from(integer));
    }
    if let Ok(unsigned) = text.parse::<u64>() {
        return Some(Number::from(unsigned));
    }
    text.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .and_then(Number::from_f64)
}

/// Best-effort numeric coercion.
///
/// Numbers pass through, booleans become `0`/`1`, strings are parsed as
/// decimals. Everything else has no numeric form.
pub fn coerce_number(value: &Value) -> Option<Number> {
    match value {
        Value::Number(number) => Some(number.clone()),
        Value::Bool(flag) => Some(Number::from(i64::from(*flag))),
        Value::String(text) => parse_number(text),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Coerces a value to `f64`.
pub fn coerce_f64(value: &Value) -> Option<f64> {
    coerce_number(value).and_then(|number| number.as_f64())
}

/// `toNumber`: numeric coercion, null when the value has no numeric form.
pub fn to_number(value: &Value) -> Value {
    coerce_number(value).map_or(Value::Null, Value::Number)
}

/// `toInteger`: numeric coercion truncated toward zero.
pub fn to_integer(value: &Value) -> Value {
    let Some(number) = coerce_number(value) else {
        return Value::Null;
    };
    if let Some(integer) = number.as_i64() {
        return Value::from(integer);
    }
    if let Some(unsigned) = number.as_u64() {
        return Value::from(unsigned);
    }
    number
        .as_f64()
        .map_or(Value::Null, |float| Value::from(float.trunc() as i64))
}

/// `round`: rounds half away from zero to `places` decimal digits.
///
/// Rounding is done in decimal arithmetic so that `2.345` rounds to `2.35`.
/// Negative `places` round to tens, hundreds, and so on.
pub fn round(value: &Value, places: i32) -> Value {
    let Some(number) = coerce_number(value) else {
        return Value::Null;
    };
    match to_decimal(&number).and_then(|decimal| round_decimal(decimal, places)) {
        Some(rounded) => decimal_value(rounded),
        None => number.as_f64().map_or(Value::Null, |float| {
            let scale = 10f64.powi(places);
            number_value((float * scale).round() / scale)
        }),
    }
}

/// `clamp`: numeric coercion, then bounds the value into `[min, max]`.
///
/// A missing bound is unbounded on that side.
pub fn clamp(value: &Value, min: Option<f64>, max: Option<f64>) -> Value {
    let Some(mut float) = coerce_f64(value) else {
        return Value::Null;
    };
    if let Some(max) = max {
        float = float.min(max);
    }
    if let Some(min) = min {
        float = float.max(min);
    }
    number_value(float)
}

fn to_decimal(number: &Number) -> Option<Decimal> {
    if let Some(integer) = number.as_i64() {
        return Some(Decimal::from(integer));
    }
    if let Some(unsigned) = number.as_u64() {
        return Some(Decimal::from(unsigned));
    }
    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

fn round_decimal(decimal: Decimal, places: i32) -> Option<Decimal> {
    if places >= 0 {
        return Some(
            decimal.round_dp_with_strategy(places.unsigned_abs(), RoundingStrategy::MidpointAwayFromZero),
        );
    }
    let factor = Decimal::from(10u64.checked_pow(places.unsigned_abs())?);
    let scaled = decimal.checked_div(factor)?;
    scaled
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .checked_mul(factor)
}

fn decimal_value(decimal: Decimal) -> Value {
    let text = decimal.normalize().to_string();
    parse_number(&text).map_or(Value::Null, Value::Number)
}
