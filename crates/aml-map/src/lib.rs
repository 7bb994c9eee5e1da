#![deny(unsafe_code)]

//! Rule engine for aasx.map/v1 configurations.
//!
//! - **query**: path query execution over the payload
//! - **selector**: cycle-safe selector and variable resolution
//! - **predicate**: `any`/`all`/`not` rule guards
//! - **pipeline**: transform chains
//! - **constraints**: final-value validation
//! - **tree**: slash-path insertion into the output
//! - **engine**: the per-rule state machine tying it together

pub mod constraints;
pub mod engine;
pub mod pipeline;
pub mod predicate;
pub mod query;
pub mod selector;
pub mod serializer;
pub mod tree;

pub use engine::MappingEngine;
pub use selector::Scope;
pub use serializer::{SerializerError, SubmodelSerializer};
