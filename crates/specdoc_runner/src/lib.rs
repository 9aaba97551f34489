//! # specdoc_runner
//!
//! Spec sources for specdoc.
//!
//! A spec source answers one question: given a module, what is its raw
//! specification data? Module code is never loaded into this process.
//!
//! # Sources
//!
//! - **FileSource**: a JSON or YAML data file exported by the module
//! - **CommandSource**: an external provider command run in its own process,
//!   receiving the module on stdin and printing the spec on stdout
//!
//! # Example
//!
//! ```rust,no_run
//! use specdoc_runner::{CommandSource, ModuleRef, ProviderConfig, SpecSource};
//!
//! let source = CommandSource::new(ProviderConfig::new(vec![
//!     "python3".to_string(),
//!     "tools/export_spec.py".to_string(),
//!     "{path}".to_string(),
//! ]));
//!
//! let module = ModuleRef::from_path("plugins/modules/instance.py", None);
//! let raw = source.load(&module).unwrap();
//! println!("{}", raw["description"]);
//! ```

pub mod collection;
pub mod command;
pub mod error;
pub mod file;
pub mod raw;
pub mod source;

pub use collection::find_collections_root;
pub use command::{CommandSource, ProviderConfig};
pub use error::{SourceError, SourceResult};
pub use file::FileSource;
pub use raw::{parse_raw, RawFormat};
pub use source::{ModuleRef, SpecSource};
