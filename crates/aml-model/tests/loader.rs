//! Tests for reading configuration and payload files.

use std::fs;

use aml_model::{ConfigError, DocumentFormat, load_config, read_json};
use serde_json::json;
use tempfile::tempdir;

#[test]
fn format_follows_extension() {
    use std::path::Path;
    assert_eq!(DocumentFormat::from_path(Path::new("a.yaml")), DocumentFormat::Yaml);
    assert_eq!(DocumentFormat::from_path(Path::new("a.YML")), DocumentFormat::Yaml);
    assert_eq!(DocumentFormat::from_path(Path::new("a.json")), DocumentFormat::Json);
    assert_eq!(DocumentFormat::from_path(Path::new("mapping")), DocumentFormat::Json);
}

#[test]
fn loads_yaml_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mapping.yaml");
    fs::write(
        &path,
        r#"apiVersion: aasx.map/v1
name: demo
rules:
  - target: Process/Duration
    source:
      jsonPath: $.durationSec
    transform:
      - op: toNumber
"#,
    )
    .unwrap();

    let config = load_config(&path).unwrap();
    assert!(config.is_supported_version());
    assert_eq!(config.name.as_deref(), Some("demo"));
    assert_eq!(config.valid_rules().count(), 1);
}

#[test]
fn loads_json_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mapping.json");
    fs::write(
        &path,
        json!({"apiVersion": "aasx.map/v1", "rules": [{"target": "A", "source": {"constant": 1}}]})
            .to_string(),
    )
    .unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.valid_rules().count(), 1);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let error = load_config(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(error, ConfigError::Io { .. }));
}

#[test]
fn invalid_payload_is_json_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("payload.json");
    fs::write(&path, "{not json").unwrap();
    let error = read_json(&path).unwrap_err();
    assert!(matches!(error, ConfigError::Json { .. }));
    assert!(error.to_string().contains("payload.json"));
}
