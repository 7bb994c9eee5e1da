//! Value utilities for the AAS mapping language.
//!
//! Every function in this crate is a pure function over a [`serde_json::Value`]
//! and never fails: inputs that cannot be coerced degrade to `Value::Null`.
//!
//! - **value**: emptiness, text form and number construction helpers
//! - **numeric**: numeric coercion, half-up rounding and clamping
//! - **text**: trimming, defaults, lookup tables and regex extraction
//! - **datetime**: instant normalization and zone conversion
//! - **units**: the fixed temperature/length conversion table

pub mod datetime;
pub mod numeric;
pub mod text;
pub mod units;
pub mod value;

// Re-export common functions for external use
pub use datetime::{parse_date_time, to_zoned};
pub use numeric::{clamp, coerce_f64, coerce_number, round, to_integer, to_number};
pub use text::{default_if_empty, lookup, regex_extract, trim};
pub use units::unit_convert;
pub use value::{is_empty, number_value, text_form};
