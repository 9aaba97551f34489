//! Error types for the spec module.

use thiserror::Error;

/// Result type alias for spec operations.
pub type SpecResult<T> = Result<T, SpecError>;

/// Errors that can occur while normalizing a module specification.
#[derive(Error, Debug)]
pub enum SpecError {
    #[error("Missing required key: {0}")]
    MissingKey(String),

    #[error("Invalid value for {path}: {message}")]
    InvalidValue { path: String, message: String },

    #[error("Unknown field type '{type_name}' at {path}")]
    UnknownType { path: String, type_name: String },

    #[error("Spec validation failed:\n  - {}", .0.join("\n  - "))]
    ValidationFailed(Vec<String>),
}

impl SpecError {
    pub(crate) fn invalid(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            path: path.into(),
            message: message.into(),
        }
    }
}
