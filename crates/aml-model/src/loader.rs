//! Configuration and payload file loading.
//!
//! Configurations may be JSON or YAML; the format is chosen from the file
//! extension. Payloads are always JSON.

use std::path::Path;

use serde_json::Value;

use crate::config::MappingConfig;
use crate::error::{ConfigError, Result};

/// Text format of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Picks the format from a path: `.yaml`/`.yml` is YAML, anything else JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(std::ffi::OsStr::to_str)
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Parses document text into a JSON value.
///
/// `origin` names the document in error messages.
pub fn parse_document(text: &str, format: DocumentFormat, origin: &str) -> Result<Value> {
    match format {
        DocumentFormat::Json => serde_json::from_str(text).map_err(|source| ConfigError::Json {
            origin: origin.to_string(),
            source,
        }),
        DocumentFormat::Yaml => serde_yaml::from_str(text).map_err(|source| ConfigError::Yaml {
            origin: origin.to_string(),
            source,
        }),
    }
}

/// Reads a configuration file into its raw document tree.
pub fn read_config(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::io(path, source))?;
    let format = DocumentFormat::from_path(path);
    tracing::debug!(path = %path.display(), ?format, "Reading mapping config");
    parse_document(&text, format, &path.display().to_string())
}

/// Reads and parses a configuration file.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use aml_model::load_config;
///
/// let config = load_config(Path::new("mappings/process.yaml"))?;
/// println!("{} rules", config.rules.len());
/// ```
pub fn load_config(path: &Path) -> Result<MappingConfig> {
    let document = read_config(path)?;
    let config = MappingConfig::from_value(&document);
    tracing::debug!(
        path = %path.display(),
        rules = config.rules.len(),
        variables = config.variables.len(),
        "Loaded mapping config"
    );
    Ok(config)
}

/// Reads a JSON payload file.
pub fn read_json(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::io(path, source))?;
    parse_document(&text, DocumentFormat::Json, &path.display().to_string())
}
