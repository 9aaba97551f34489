//! Error types for documentation injection.

use thiserror::Error;

/// Result type alias for injection operations.
pub type InjectResult<T> = Result<T, InjectError>;

/// Errors that can occur while rewriting a module source file.
#[derive(Error, Debug)]
pub enum InjectError {
    #[error("No top-level `{0} = ...` assignment found")]
    MissingMarker(String),

    #[error("Unterminated string literal assigned to {marker} on line {line}")]
    UnterminatedLiteral { marker: String, line: usize },

    #[error("Cannot tell where the value assigned to {marker} on line {line} ends: {reason}")]
    UnboundedValue {
        marker: String,
        line: usize,
        reason: String,
    },

    #[error("Content for {marker} cannot be written as a raw triple-quoted string: {reason}")]
    Unrepresentable { marker: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
