//! specdoc CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid input or arguments
//! - 3: Invalid specification
//! - 4: Template or render error
//! - 5: Injection error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use specdoc_inject::InjectError;
use specdoc_runner::SourceError;
use specdoc_spec::SpecError;
use specdoc_templates::TemplateError;

mod commands;
mod config;
mod error;

use commands::Cli;
use config::SpecdocConfig;
use error::CliError;

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_INPUT: u8 = 2;
    pub const SPEC_ERROR: u8 = 3;
    pub const TEMPLATE_ERROR: u8 = 4;
    pub const INJECTION_ERROR: u8 = 5;
}

const CRATE_TARGETS: &[&str] = &[
    "specdoc",
    "specdoc_spec",
    "specdoc_runner",
    "specdoc_templates",
    "specdoc_inject",
];

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    let result = SpecdocConfig::discover(cli.config.as_deref())
        .map_err(anyhow::Error::from)
        .and_then(|config| commands::generate::execute(cli.generate, &config));

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Logs go to stderr; stdout carries rendered output only.
fn init_logging(cli: &Cli) {
    let filter = if cli.verbose {
        EnvFilter::new(directives("debug"))
    } else if cli.quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives("info")))
    };

    let registry = tracing_subscriber::registry().with(filter);
    let log_result = if cli.log_json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
    };

    if log_result.is_err() {
        // Logging already initialized, continue
    }
}

fn directives(level: &str) -> String {
    let mut parts: Vec<String> = CRATE_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect();
    parts.push("warn".to_string());
    parts.join(",")
}

/// Map the first typed error in the chain to an exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    for cause in e.chain() {
        if cause.is::<CliError>() || cause.is::<SourceError>() {
            return ExitCodes::INVALID_INPUT;
        }
        if cause.is::<SpecError>() {
            return ExitCodes::SPEC_ERROR;
        }
        if cause.is::<TemplateError>() {
            return ExitCodes::TEMPLATE_ERROR;
        }
        if cause.is::<InjectError>() {
            return ExitCodes::INJECTION_ERROR;
        }
    }
    ExitCodes::GENERAL_ERROR
}
