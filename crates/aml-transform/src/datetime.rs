//! Date/time normalization.
//!
//! Two textual shapes are accepted as input:
//!
//! - RFC 3339 / ISO 8601 offset date-times, e.g. `2024-01-15T10:30:00+01:00`
//!   or `2024-01-15T09:30:00.250Z`
//! - the same without seconds, e.g. `2024-01-15T10:30+01:00`
//!
//! Output is always canonical RFC 3339 text: whole seconds are always
//! written, fractional seconds only when present (in groups of three
//! digits), and a zero offset is written as `Z`.

use std::str::FromStr;

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use chrono_tz::Tz;
use serde_json::Value;
use tracing::warn;

/// Format accepted when the seconds component is omitted.
const MINUTE_PRECISION_FORMAT: &str = "%Y-%m-%dT%H:%M%#z";

/// A named zone or a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Zone {
    Named(Tz),
    Fixed(FixedOffset),
}

impl Zone {
    fn parse(zone: &str) -> Option<Self> {
        let zone = zone.trim();
        if let Ok(named) = Tz::from_str(zone) {
            return Some(Self::Named(named));
        }
        FixedOffset::from_str(zone).ok().map(Self::Fixed)
    }

    fn convert(self, instant: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
        match self {
            Self::Named(zone) => instant.with_timezone(&zone).fixed_offset(),
            Self::Fixed(offset) => instant.with_timezone(&offset),
        }
    }
}

/// Parses an offset date-time, or an instant written with a `Z` designator.
fn parse_offset_date_time(text: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(text)
        .or_else(|_| DateTime::parse_from_str(text, MINUTE_PRECISION_FORMAT))
        .ok()
}

fn canonical(instant: &DateTime<FixedOffset>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// `parseDateTime`: normalizes a date-time string to a UTC instant.
///
/// `2024-01-15T10:30:00+01:00` becomes `2024-01-15T09:30:00Z`.
/// Non-strings and unparsable text become null.
pub fn parse_date_time(value: &Value) -> Value {
    let Some(text) = value.as_str() else {
        return Value::Null;
    };
    parse_offset_date_time(text).map_or(Value::Null, |parsed| {
        Value::String(
            parsed
                .with_timezone(&Utc)
                .to_rfc3339_opts(SecondsFormat::AutoSi, true),
        )
    })
}

/// `toZoned`: converts a date-time string into the given zone.
///
/// `zone` is an IANA name (`Europe/Berlin`, `UTC`) or a fixed offset
/// (`+05:30`). The result is the offset date-time of the same instant in
/// that zone. Unknown zones and unparsable input become null.
pub fn to_zoned(value: &Value, zone: &str) -> Value {
    let Some(text) = value.as_str() else {
        return Value::Null;
    };
    let Some(target) = Zone::parse(zone) else {
        warn!(zone, "unknown time zone; value dropped");
        return Value::Null;
    };
    parse_offset_date_time(text).map_or(Value::Null, |parsed| {
        Value::String(canonical(&target.convert(parsed)))
    })
}
