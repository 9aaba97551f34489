//! Renderer trait and structured-data dumps.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use specdoc_spec::Document;

use crate::context::document_context;
use crate::error::{TemplateError, TemplateResult};

/// Output formats selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Yaml,
    Json,
    Template,
    ArgSpec,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
            Self::Template => "template",
            Self::ArgSpec => "argspec",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            "template" | "handlebars" | "hbs" => Ok(Self::Template),
            "argspec" => Ok(Self::ArgSpec),
            other => Err(TemplateError::UnknownFormat(other.to_string())),
        }
    }
}

/// Anything that turns a document into text.
pub trait Renderer {
    fn render(&self, document: &Document) -> TemplateResult<String>;
}

/// Serializes the documentation context as YAML or JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuredDump {
    Yaml,
    Json,
}

impl Renderer for StructuredDump {
    fn render(&self, document: &Document) -> TemplateResult<String> {
        let context = document_context(document)?;
        debug!("Dumping {} as {:?}", document.module, self);

        match self {
            Self::Yaml => Ok(serde_yaml::to_string(&context)?),
            Self::Json => {
                let mut out = serde_json::to_string_pretty(&context)?;
                out.push('\n');
                Ok(out)
            }
        }
    }
}
