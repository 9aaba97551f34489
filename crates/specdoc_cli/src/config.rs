//! `specdoc.toml` configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use specdoc_inject::{
    Section, DEFAULT_DOCUMENTATION_MARKER, DEFAULT_EXAMPLES_MARKER, DEFAULT_RETURN_MARKER,
};
use specdoc_runner::ProviderConfig;
use specdoc_templates::{AnsibleDocSections, OutputFormat};

use crate::error::CliError;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "specdoc.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpecdocConfig {
    pub output: OutputConfig,
    pub provider: ProviderConfig,
    pub inject: InjectConfig,

    /// Directory relative paths in the file are resolved against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// Defaults for rendered output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: Option<String>,
    pub template: Option<PathBuf>,
}

/// Names of the assignments rewritten by `--inject`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct InjectConfig {
    pub documentation: String,
    pub returns: String,
    pub examples: String,
}

impl Default for InjectConfig {
    fn default() -> Self {
        Self {
            documentation: DEFAULT_DOCUMENTATION_MARKER.to_string(),
            returns: DEFAULT_RETURN_MARKER.to_string(),
            examples: DEFAULT_EXAMPLES_MARKER.to_string(),
        }
    }
}

impl InjectConfig {
    pub fn sections(&self, rendered: AnsibleDocSections) -> Vec<Section> {
        vec![
            Section::new(&self.documentation, rendered.documentation),
            Section::new(&self.returns, rendered.returns),
            Section::new(&self.examples, rendered.examples),
        ]
    }

    pub fn clear_sections(&self) -> Vec<Section> {
        self.sections(AnsibleDocSections::empty())
    }
}

impl SpecdocConfig {
    /// Load the explicit config file, or `specdoc.toml` from the working
    /// directory when it exists, or fall back to defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, CliError> {
        match explicit {
            Some(path) if !path.exists() => Err(CliError::ConfigNotFound(path.to_path_buf())),
            Some(path) => Self::load(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::load(path)
                } else {
                    debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self, CliError> {
        let invalid = |message: String| CliError::InvalidConfig {
            path: path.to_path_buf(),
            message,
        };

        let content = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        let mut config: Self = toml::from_str(&content).map_err(|e| invalid(e.to_string()))?;

        config.base_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        if config.provider.workdir.is_none() && config.provider.is_configured() {
            config.provider.workdir = Some(config.base_dir.clone());
        } else if let Some(dir) = config.provider.workdir.take() {
            config.provider.workdir = Some(config.resolve(&dir));
        }

        // Surface a bad format here rather than at render time.
        config.output_format().map_err(|e| invalid(e.to_string()))?;

        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn output_format(&self) -> Result<Option<OutputFormat>, specdoc_templates::TemplateError> {
        self.output.format.as_deref().map(str::parse).transpose()
    }

    pub fn template_path(&self) -> Option<PathBuf> {
        self.output.template.as_deref().map(|p| self.resolve(p))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}
