#![deny(unsafe_code)]

//! Payload JSON Schema inference for mapping configurations.

pub mod infer;
pub mod node;
pub mod tokenizer;

pub use infer::{export_payload_schema, infer};
pub use node::{JsonType, Properties, SCHEMA_DIALECT, SchemaDocument, SchemaNode};
pub use tokenizer::{Token, tokenize};
