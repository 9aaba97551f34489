//! # specdoc_inject
//!
//! Rewrites the documentation assignments of a module source file in place.
//!
//! A module carries its documentation as top-level string assignments:
//!
//! ```text
//! DOCUMENTATION = r"""
//! module: widget
//! """
//! ```
//!
//! [`Injector`] replaces the value of each named assignment with freshly
//! rendered content and leaves every other byte of the file alone.
//!
//! ```rust
//! use specdoc_inject::{Injector, Section};
//!
//! let source = "import os\nRETURN = ''\n";
//! let out = Injector::inject(source, &[Section::new("RETURN", "x: 1\n")]).unwrap();
//! assert_eq!(out, "import os\nRETURN = r\"\"\"\nx: 1\n\"\"\"\n");
//! ```

pub mod error;
pub mod injector;

pub use error::{InjectError, InjectResult};
pub use injector::{
    Injector, Section, DEFAULT_DOCUMENTATION_MARKER, DEFAULT_EXAMPLES_MARKER,
    DEFAULT_RETURN_MARKER,
};
