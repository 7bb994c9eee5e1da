//! `aml`: map JSON payloads and export payload schemas.

use std::process::ExitCode;

use aml_cli::cli::{Cli, Command};
use aml_cli::commands::{run_map, run_schema};
use aml_cli::logging::init_logging;
use aml_cli::summary::print_errors;
use clap::Parser;
use serde_json::Value;

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(error) = init_logging(&cli.log_config()) {
        eprintln!("error: failed to initialize logging: {error}");
        return ExitCode::FAILURE;
    }
    let outcome = match &cli.command {
        Command::Map(args) => run_map(args).map(|outcome| {
            match &outcome.written {
                Some(path) => println!("Wrote: {}", path.display()),
                None => print_json(outcome.result.output()),
            }
            print_errors(outcome.result.errors());
        }),
        Command::Schema(args) => run_schema(args).map(|outcome| match &outcome.written {
            Some(path) => println!("Wrote schema: {}", path.display()),
            None => print_json(&outcome.document.to_json()),
        }),
    };
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(error) => eprintln!("error: {error}"),
    }
}
