//! Spec source trait and types.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::SourceResult;

/// Identifies the module whose specification is requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRef {
    /// Module name used in generated documentation
    pub name: String,
    /// Module source file, when read from disk
    pub path: Option<PathBuf>,
    /// Module source text, when already read (stdin input)
    pub content: Option<String>,
}

impl ModuleRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            content: None,
        }
    }

    /// A module read from a file; the name defaults to the file stem.
    pub fn from_path(path: impl Into<PathBuf>, name: Option<String>) -> Self {
        let path = path.into();
        let name = name.unwrap_or_else(|| Self::name_from_path(&path));
        Self {
            name,
            path: Some(path),
            content: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    fn name_from_path(path: &Path) -> String {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Anything that can turn a module identifier into its raw specification.
///
/// The returned value is always a mapping; it is normalized by
/// `specdoc_spec::SpecNormalizer`.
pub trait SpecSource {
    /// Produce the raw specification of the module.
    fn load(&self, module: &ModuleRef) -> SourceResult<Value>;

    /// Short human-readable description for logs.
    fn describe(&self) -> String;
}
