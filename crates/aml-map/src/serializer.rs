//! Hand-off to an external submodel serializer.

use std::collections::BTreeMap;

use aml_model::SubmodelHeader;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SerializerError {
    #[error("{0}")]
    Rejected(String),

    #[error("invalid document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Converts a mapped value tree into a standards-shaped submodel document.
///
/// `elements` holds the per-path element metadata declared in the header's
/// `initialElements`, keyed by target path.
pub trait SubmodelSerializer {
    fn serialize(
        &self,
        header: &SubmodelHeader,
        elements: &BTreeMap<String, Map<String, Value>>,
        tree: &Value,
    ) -> Result<Value, SerializerError>;
}
