//! Tests for the `map` and `schema` commands.

use std::fs;
use std::path::Path;

use aml_cli::cli::{Cli, Command, MapArgs, SchemaArgs};
use aml_cli::commands::{output_path, run_map, run_schema};
use clap::Parser;
use serde_json::{Value, json};
use tempfile::TempDir;

const CONFIG_YAML: &str = r#"
apiVersion: aasx.map/v1
name: line-1
rules:
  - target: Process/Duration
    source: { jsonPath: "$.duration" }
    transform:
      - { op: toNumber }
  - target: Process/Temperature
    source: { jsonPath: "$.temp" }
    constraints:
      - { kind: range, max: 100 }
"#;

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn map_writes_output_named_after_config() {
    let dir = TempDir::new().unwrap();
    let config = write(dir.path(), "mapping.yaml", CONFIG_YAML);
    let payload = write(dir.path(), "payload.json", r#"{"duration": "42", "temp": 150}"#);
    let outdir = dir.path().join("out");

    let outcome = run_map(&MapArgs {
        config,
        payload,
        outdir: Some(outdir.clone()),
        strict: false,
    })
    .unwrap();

    let expected = outdir.join("line-1.json");
    assert_eq!(outcome.written.as_deref(), Some(expected.as_path()));
    let written: Value = serde_json::from_str(&fs::read_to_string(&expected).unwrap()).unwrap();
    assert_eq!(written, json!({"Process": {"Duration": 42}}));
    assert_eq!(
        outcome.result.errors(),
        ["Constraint failed at 'Process/Temperature': range".to_string()]
    );
}

#[test]
fn map_without_outdir_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let config = write(dir.path(), "mapping.yaml", CONFIG_YAML);
    let payload = write(dir.path(), "payload.json", r#"{"duration": 7, "temp": 20}"#);

    let outcome = run_map(&MapArgs {
        config,
        payload,
        outdir: None,
        strict: false,
    })
    .unwrap();

    assert!(outcome.written.is_none());
    assert!(!outcome.result.has_errors());
    assert_eq!(
        outcome.result.output(),
        &json!({"Process": {"Duration": 7, "Temperature": 20}})
    );
}

#[test]
fn map_reports_missing_config() {
    let dir = TempDir::new().unwrap();
    let payload = write(dir.path(), "payload.json", "{}");

    let error = run_map(&MapArgs {
        config: dir.path().join("absent.json"),
        payload,
        outdir: None,
        strict: false,
    })
    .unwrap_err();

    assert!(format!("{error:#}").contains("absent.json"));
}

#[test]
fn schema_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let config = write(dir.path(), "mapping.yaml", CONFIG_YAML);
    let out = dir.path().join("nested/deeper/schema.json");

    let outcome = run_schema(&SchemaArgs {
        config,
        out: Some(out.clone()),
    })
    .unwrap();

    assert_eq!(outcome.written.as_deref(), Some(out.as_path()));
    let written: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written, outcome.document.to_json());
    assert_eq!(written["title"], json!("line-1"));
    assert_eq!(written["required"], json!(["duration", "temp"]));
}

#[test]
fn output_path_appends_json_extension() {
    assert_eq!(
        output_path(Path::new("out"), "mapping-output"),
        Path::new("out").join("mapping-output.json")
    );
}

#[test]
fn parses_map_subcommand() {
    let cli = Cli::try_parse_from([
        "aml", "map", "--config", "c.yaml", "--payload", "p.json", "--strict",
    ])
    .unwrap();
    match cli.command {
        Command::Map(args) => {
            assert_eq!(args.config, Path::new("c.yaml"));
            assert!(args.strict);
            assert!(args.outdir.is_none());
        }
        Command::Schema(_) => panic!("expected map"),
    }
}

#[test]
fn missing_required_argument_is_usage_error() {
    let error = Cli::try_parse_from(["aml", "map", "--config", "c.yaml"])
        .err()
        .unwrap();
    assert_eq!(error.exit_code(), 2);
}

#[test]
fn log_flags_set_level_and_disable_env_filter() {
    use aml_cli::logging::LogFormat;
    use tracing::level_filters::LevelFilter;

    let quiet = Cli::try_parse_from(["aml", "schema", "--config", "c.yaml"]).unwrap();
    let config = quiet.log_config();
    assert_eq!(config.level_filter, LevelFilter::WARN);
    assert!(config.use_env_filter);
    assert!(!config.with_target);
    assert!(!config.with_timestamps);

    let verbose = Cli::try_parse_from([
        "aml", "-vv", "--log-format", "json", "schema", "--config", "c.yaml",
    ])
    .unwrap();
    let config = verbose.log_config();
    assert_eq!(config.level_filter, LevelFilter::DEBUG);
    assert_eq!(config.format, LogFormat::Json);
    assert!(!config.use_env_filter);

    let explicit = Cli::try_parse_from([
        "aml", "-v", "schema", "--config", "c.yaml", "--log-level", "trace",
    ])
    .unwrap();
    assert_eq!(explicit.log_config().level_filter, LevelFilter::TRACE);

    let detailed = Cli::try_parse_from([
        "aml", "map", "--config", "c.yaml", "--payload", "p.json", "--log-target",
        "--log-timestamps",
    ])
    .unwrap();
    let config = detailed.log_config();
    assert!(config.with_target);
    assert!(config.with_timestamps);
}
