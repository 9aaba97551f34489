//! # specdoc_spec
//!
//! The documentation model of a module specification and the normalizer that
//! builds it from raw provider data.
//!
//! ## Model
//!
//! - **Field**: one option with its type, default, choices and suboptions
//! - **ReturnValue**: one documented return value
//! - **DeprecationInfo**: optional module deprecation notice
//! - **Document**: everything above plus module-level metadata
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use specdoc_spec::SpecNormalizer;
//!
//! let raw = json!({
//!     "description": ["Manage widgets"],
//!     "options": {
//!         "name": {"type": "str", "required": true, "description": "Widget name"}
//!     }
//! });
//!
//! let doc = SpecNormalizer::normalize("widget", &raw).unwrap();
//! assert!(doc.options["name"].required);
//! ```

pub mod error;
pub mod models;
pub mod normalizer;
pub mod validator;

pub use error::{SpecError, SpecResult};
pub use models::*;
pub use normalizer::{SpecNormalizer, REQUIRED_KEYS};
pub use validator::{SpecValidator, ValidationResult};
