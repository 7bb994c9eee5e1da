#![deny(unsafe_code)]

//! Mapping configuration model.
//!
//! A mapping document is parsed once, up front, into the typed variants of
//! this crate; the engine and the schema exporter only ever match on them.

pub mod config;
pub mod constraint;
pub mod error;
pub mod loader;
pub mod options;
pub mod predicate;
pub mod result;
pub mod rule;
pub mod selector;
pub mod transform;

pub use config::{MappingConfig, RuleEntry, SUPPORTED_API_VERSION, SubmodelHeader};
pub use constraint::{Constraint, ConstraintKind};
pub use error::{ConfigError, MappingIssue, Result};
pub use loader::{DocumentFormat, load_config, parse_document, read_config, read_json};
pub use options::{MappingOptions, UnknownOpPolicy};
pub use predicate::{Atom, Predicate};
pub use result::MappingResult;
pub use rule::Rule;
pub use selector::{Selector, SelectorKind};
pub use transform::{ConcatPart, TransformOp};
