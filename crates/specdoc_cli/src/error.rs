//! Errors raised by the command line layer itself.

use std::path::PathBuf;

use thiserror::Error;

/// Argument and configuration problems detected after clap has parsed the
/// command line.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Invalid config file {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },
}
