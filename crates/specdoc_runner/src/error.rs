//! Error types for spec sources.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors that can occur while obtaining a raw specification.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Input not found: {0}")]
    NotFound(PathBuf),

    #[error("Malformed spec data from {origin}: {message}")]
    Malformed { origin: String, message: String },

    #[error("Unsupported spec data format: {0}")]
    UnsupportedFormat(String),

    #[error("No spec provider configured for module {0}; pass --spec-file or set provider.command")]
    ProviderNotConfigured(String),

    #[error("Failed to spawn provider {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Provider {program} exited with {status}: {stderr}")]
    ProviderFailed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
