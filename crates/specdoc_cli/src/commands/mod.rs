//! CLI command definitions.
//!
//! specdoc has a single flat command: load a module specification, then
//! either render it or inject it back into the module source.

use std::path::PathBuf;

use clap::Parser;

pub mod generate;

/// specdoc - documentation generator for Ansible modules
#[derive(Parser, Debug)]
#[command(name = "specdoc")]
#[command(version, about = "Generate and inject Ansible module documentation from its argument spec")]
#[command(long_about = r#"
specdoc reads the argument specification of an Ansible module, validates it,
and renders it as YAML, JSON, an Ansible argument spec, or through a
Handlebars template. With --inject it rewrites the DOCUMENTATION, RETURN and
EXAMPLES assignments of the module source in place.

SPEC SOURCES:
  --spec-file        → a JSON or YAML data file
  -i module.json     → an input file that is itself spec data
  [provider] command → an external command configured in specdoc.toml

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid input or arguments
  3 - Invalid specification
  4 - Template or render error
  5 - Injection error
"#)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Config file (default: ./specdoc.toml when present)
    #[arg(long, env = "SPECDOC_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub generate: generate::GenerateArgs,
}
