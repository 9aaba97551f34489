//! # specdoc_templates
//!
//! Renderers that turn a normalized [`Document`](specdoc_spec::Document)
//! into text.
//!
//! - [`StructuredDump`]: the documentation context as YAML or JSON
//! - [`TemplatedRender`]: a user Handlebars template over the same context
//! - [`ArgSpecDump`]: the runtime argument spec as JSON
//! - [`AnsibleDoc`]: the `DOCUMENTATION`, `RETURN` and `EXAMPLES` blocks
//!
//! ## Example
//!
//! ```rust
//! use specdoc_spec::{Document, Field, FieldType};
//! use specdoc_templates::{Renderer, TemplatedRender};
//!
//! let mut doc = Document::new("widget");
//! doc.options.insert("size".into(), Field::new(FieldType::Integer));
//!
//! let tmpl = TemplatedRender::from_source("inline", "{{module}}: {{#each options}}{{@key}}{{/each}}").unwrap();
//! assert_eq!(tmpl.render(&doc).unwrap(), "widget: size");
//! ```

pub mod ansible;
pub mod context;
pub mod error;
pub mod renderer;
pub mod templated;

pub use ansible::{AnsibleDoc, AnsibleDocSections, ArgSpecDump};
pub use context::document_context;
pub use error::{TemplateError, TemplateResult};
pub use renderer::{OutputFormat, Renderer, StructuredDump};
pub use templated::TemplatedRender;
