use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{info, info_span, warn};

use aml_map::MappingEngine;
use aml_model::{MappingOptions, MappingResult, load_config, read_json};
use aml_schema::{SchemaDocument, export_payload_schema};

use crate::cli::{MapArgs, SchemaArgs};

/// Result of the `map` command.
#[derive(Debug)]
pub struct MapOutcome {
    pub result: MappingResult,
    /// Where the output document was written, when `--outdir` was given.
    pub written: Option<PathBuf>,
}

/// Result of the `schema` command.
#[derive(Debug)]
pub struct SchemaOutcome {
    pub document: SchemaDocument,
    pub written: Option<PathBuf>,
}

pub fn run_map(args: &MapArgs) -> Result<MapOutcome> {
    let span = info_span!("map", config = %args.config.display());
    let _guard = span.enter();

    let config = load_config(&args.config)
        .with_context(|| format!("load config {}", args.config.display()))?;
    let payload = read_json(&args.payload)
        .with_context(|| format!("read payload {}", args.payload.display()))?;

    let options = if args.strict {
        MappingOptions::strict()
    } else {
        MappingOptions::default()
    };
    let engine = MappingEngine::new(options);
    if config.submodel.is_some() && !engine.has_serializer() {
        warn!("submodel header present but no serializer registered; emitting the output tree");
    }

    let result = engine.map(&config, &payload);
    info!(
        rules = config.rules.len(),
        errors = result.errors().len(),
        "mapping complete"
    );

    let written = match &args.outdir {
        Some(outdir) => {
            let path = output_path(outdir, &config.output_base_name());
            write_json(&path, result.output())?;
            info!(path = %path.display(), "wrote output");
            Some(path)
        }
        None => None,
    };

    Ok(MapOutcome { result, written })
}

pub fn run_schema(args: &SchemaArgs) -> Result<SchemaOutcome> {
    let span = info_span!("schema", config = %args.config.display());
    let _guard = span.enter();

    let config = load_config(&args.config)
        .with_context(|| format!("load config {}", args.config.display()))?;
    let document = export_payload_schema(&config);
    info!(
        properties = document.properties.len(),
        "schema inferred"
    );

    if let Some(path) = &args.out {
        write_json(path, &document.to_json())?;
        info!(path = %path.display(), "wrote schema");
    }

    Ok(SchemaOutcome {
        document,
        written: args.out.clone(),
    })
}

/// `<outdir>/<base>.json`.
pub fn output_path(outdir: &Path, base: &str) -> PathBuf {
    outdir.join(format!("{base}.json"))
}

fn write_json(path: &Path, value: &Value) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let mut text = serde_json::to_string_pretty(value).context("serialize output")?;
    text.push('\n');
    fs::write(path, text).with_context(|| format!("write {}", path.display()))
}
