//! Spec source that runs an external provider command.
//!
//! The provider is the plugin side of the contract: it receives the module
//! (path and name as arguments/environment, source text on stdin), produces
//! the module spec data on stdout and exits. It runs in its own process,
//! so module top-level code never executes inside specdoc.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::collection::find_collections_root;
use crate::error::{SourceError, SourceResult};
use crate::raw::{parse_raw, RawFormat};
use crate::source::{ModuleRef, SpecSource};

pub const ENV_MODULE_NAME: &str = "SPECDOC_MODULE_NAME";
pub const ENV_MODULE_PATH: &str = "SPECDOC_MODULE_PATH";
pub const ENV_COLLECTIONS_ROOT: &str = "SPECDOC_COLLECTIONS_ROOT";

/// Provider command configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProviderConfig {
    /// Program followed by its arguments. `{path}` and `{name}` are substituted.
    pub command: Vec<String>,
    /// Format of the provider's stdout
    pub format: RawFormat,
    /// Extra environment variables
    pub env: BTreeMap<String, String>,
    /// Working directory for the provider
    pub workdir: Option<PathBuf>,
}

impl ProviderConfig {
    pub fn new(command: Vec<String>) -> Self {
        Self {
            command,
            ..Self::default()
        }
    }

    pub fn format(mut self, format: RawFormat) -> Self {
        self.format = format;
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn is_configured(&self) -> bool {
        !self.command.is_empty()
    }
}

/// Runs the configured provider command for each module.
#[derive(Debug, Clone)]
pub struct CommandSource {
    config: ProviderConfig,
}

impl CommandSource {
    pub fn new(config: ProviderConfig) -> Self {
        Self { config }
    }

    /// Substitute module placeholders in the configured arguments.
    pub fn expand_args(&self, module: &ModuleRef) -> Vec<String> {
        let path = module
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        self.config
            .command
            .iter()
            .skip(1)
            .map(|arg| arg.replace("{path}", &path).replace("{name}", &module.name))
            .collect()
    }

    fn build_command(&self, program: &str, module: &ModuleRef) -> Command {
        let mut cmd = Command::new(program);
        cmd.args(self.expand_args(module));
        cmd.stdin(Stdio::piped());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        cmd.env(ENV_MODULE_NAME, &module.name);
        if let Some(path) = &module.path {
            cmd.env(ENV_MODULE_PATH, path);
        }

        let search_from = module
            .path
            .clone()
            .or_else(|| self.config.workdir.clone())
            .unwrap_or_else(|| PathBuf::from("."));
        match find_collections_root(&search_from) {
            Some(root) => {
                cmd.env(ENV_COLLECTIONS_ROOT, root);
            }
            None => warn!(
                "{:?} is not at or below an Ansible collection ({{...}}/ansible_collections/{{namespace}}/{{collection}}/)",
                search_from
            ),
        }

        cmd.envs(&self.config.env);
        if let Some(dir) = &self.config.workdir {
            cmd.current_dir(dir);
        }

        cmd
    }

    fn module_source(module: &ModuleRef) -> SourceResult<String> {
        match (&module.content, &module.path) {
            (Some(content), _) => Ok(content.clone()),
            (None, Some(path)) if path.exists() => Ok(std::fs::read_to_string(path)?),
            (None, Some(path)) => Err(SourceError::NotFound(path.clone())),
            (None, None) => Ok(String::new()),
        }
    }
}

impl SpecSource for CommandSource {
    fn load(&self, module: &ModuleRef) -> SourceResult<Value> {
        let program = self
            .config
            .command
            .first()
            .ok_or_else(|| SourceError::ProviderNotConfigured(module.name.clone()))?;

        let input = Self::module_source(module)?;
        let mut cmd = self.build_command(program, module);
        debug!("Running provider {} {:?}", program, self.expand_args(module));

        let mut child = cmd.spawn().map_err(|source| SourceError::Spawn {
            program: program.clone(),
            source,
        })?;

        // Feed stdin from a separate thread so a chatty provider cannot block on a full pipe.
        let writer = child.stdin.take().map(|mut stdin| {
            std::thread::spawn(move || {
                // The provider may exit without reading stdin.
                let _ = stdin.write_all(input.as_bytes());
            })
        });

        let output = child.wait_with_output()?;
        if let Some(handle) = writer {
            let _ = handle.join();
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !output.status.success() {
            return Err(SourceError::ProviderFailed {
                program: program.clone(),
                status: output.status.to_string(),
                stderr,
            });
        }
        if !stderr.is_empty() {
            debug!("Provider stderr: {}", stderr);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_raw(&stdout, self.config.format, &format!("provider {}", program))
    }

    fn describe(&self) -> String {
        format!("provider `{}`", self.config.command.join(" "))
    }
}
