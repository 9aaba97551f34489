//! Spec source backed by a data file.

use std::fs;
use std::path::PathBuf;

use serde_json::Value;
use tracing::debug;

use crate::error::{SourceError, SourceResult};
use crate::raw::{parse_raw, RawFormat};
use crate::source::{ModuleRef, SpecSource};

/// Reads the raw specification from a JSON or YAML file.
///
/// The module reference is only used for its name; the file content is the
/// specification itself.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    format: RawFormat,
}

impl FileSource {
    /// Create a source, inferring the format from the file extension.
    pub fn new(path: impl Into<PathBuf>) -> SourceResult<Self> {
        let path = path.into();
        let format = RawFormat::from_path(&path).ok_or_else(|| {
            SourceError::UnsupportedFormat(path.display().to_string())
        })?;
        Ok(Self { path, format })
    }

    pub fn with_format(path: impl Into<PathBuf>, format: RawFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }
}

impl SpecSource for FileSource {
    fn load(&self, module: &ModuleRef) -> SourceResult<Value> {
        if !self.path.exists() {
            return Err(SourceError::NotFound(self.path.clone()));
        }

        debug!("Reading spec for {} from {:?}", module.name, self.path);
        let content = fs::read_to_string(&self.path)?;
        parse_raw(&content, self.format, &self.path.display().to_string())
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
