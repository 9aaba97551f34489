//! Error types for rendering.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for rendering operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Errors that can occur while rendering documentation.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(PathBuf),

    #[error("Template syntax error in {template}{}: {message}", location(.line, .column))]
    Syntax {
        template: String,
        line: Option<usize>,
        column: Option<usize>,
        message: String,
    },

    #[error("Template rendering failed in {template}{}: {message}", location(.line, .column))]
    RenderingFailed {
        template: String,
        line: Option<usize>,
        column: Option<usize>,
        message: String,
    },

    #[error("Unknown output format: {0}")]
    UnknownFormat(String),

    #[error("Template file required for the template format")]
    MissingTemplate,

    #[error("Examples are not valid YAML: {0}")]
    InvalidExamples(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn location(line: &Option<usize>, column: &Option<usize>) -> String {
    match (line, column) {
        (Some(line), Some(column)) => format!(" at line {}, column {}", line, column),
        (Some(line), None) => format!(" at line {}", line),
        _ => String::new(),
    }
}
