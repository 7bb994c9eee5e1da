use std::path::PathBuf;

use thiserror::Error;

use crate::constraint::ConstraintKind;

/// Errors raised while reading configuration or payload documents.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse YAML {origin}: {source}")]
    Yaml {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// A recoverable problem recorded in a mapping result.
///
/// The `Display` text is the diagnostic that ends up in
/// [`MappingResult::errors`](crate::MappingResult::errors).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MappingIssue {
    #[error("Unsupported or missing apiVersion: {0}")]
    UnsupportedApiVersion(String),

    #[error("No rules provided in config")]
    NoRules,

    #[error("Rule is not an object: {0}")]
    RuleNotObject(String),

    #[error("Rule missing target")]
    MissingTarget,

    #[error("Rule '{target}' is malformed: {reason}")]
    MalformedRule { target: String, reason: String },

    #[error("Variable '{name}' is malformed: {reason}")]
    MalformedVariable { name: String, reason: String },

    #[error("Rule '{target}' uses an unsupported transform op or constraint kind")]
    UnsupportedOperation { target: String },

    #[error("Constraint failed at '{target}': {kind}")]
    ConstraintFailed {
        target: String,
        kind: ConstraintKind,
    },

    #[error("Submodel serialization failed: {0}")]
    SerializationFailed(String),
}
