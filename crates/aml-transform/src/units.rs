//! Physical unit conversion.
//!
//! Only a small fixed table is supported: Celsius/Fahrenheit and the metric
//! lengths millimetre, centimetre, metre and kilometre. Pairs outside the
//! table leave the numeric value unchanged.

use serde_json::Value;

use crate::numeric::coerce_f64;
use crate::value::number_value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Celsius,
    Fahrenheit,
    /// Length unit expressed as a multiple of one millimetre.
    Length(u32),
}

impl Unit {
    fn parse(symbol: &str) -> Option<Self> {
        match symbol.trim().to_lowercase().as_str() {
            "c" | "°c" | "celsius" => Some(Self::Celsius),
            "f" | "°f" | "fahrenheit" => Some(Self::Fahrenheit),
            "mm" | "millimetre" | "millimeter" => Some(Self::Length(1)),
            "cm" | "centimetre" | "centimeter" => Some(Self::Length(10)),
            "m" | "metre" | "meter" => Some(Self::Length(1_000)),
            "km" | "kilometre" | "kilometer" => Some(Self::Length(1_000_000)),
            _ => None,
        }
    }
}

fn convert(value: f64, from: Unit, to: Unit) -> f64 {
    match (from, to) {
        (Unit::Celsius, Unit::Fahrenheit) => value * 9.0 / 5.0 + 32.0,
        (Unit::Fahrenheit, Unit::Celsius) => (value - 32.0) * 5.0 / 9.0,
        (Unit::Length(from), Unit::Length(to)) => value * f64::from(from) / f64::from(to),
        _ => value,
    }
}

/// `unitConvert`: converts a numeric value between units.
///
/// Identical unit names (case-insensitive) return the value untouched.
/// Otherwise the value is coerced to a number (null if impossible) and
/// converted when the pair is in the table.
pub fn unit_convert(value: &Value, from: &str, to: &str) -> Value {
    if value.is_null() {
        return Value::Null;
    }
    if from.eq_ignore_ascii_case(to) {
        return value.clone();
    }
    let Some(number) = coerce_f64(value) else {
        return Value::Null;
    };
    let converted = match (Unit::parse(from), Unit::parse(to)) {
        (Some(from), Some(to)) => convert(number, from, to),
        _ => number,
    };
    number_value(converted)
}
