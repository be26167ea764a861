//! Module tree model for the doctree documentation generator.
//!
//! This crate provides the in-memory representation of a documentation
//! package and everything needed to construct it:
//!
//! - [`Module`] / [`Member`]: the module tree with logical URL derivation
//! - [`load_package`]: filesystem loader that builds the tree from a source
//!   directory of markdown docs and YAML sidecar metadata
//! - [`link_inheritance`]: the docstring-inheritance pass applied once before
//!   the tree is written out
//!
//! # Placeholder modules
//!
//! Optional native dependencies that are not installed are declared up front
//! via [`LoadOptions::absent_modules`]. A `requires` entry naming one of them
//! is satisfied by an empty placeholder module attached under the root, so
//! loading never fails on a known-absent import. Placeholders expose no
//! members.
//!
//! # Example
//!
//! ```ignore
//! use doctree_model::{DocstringMode, LoadOptions, link_inheritance, load_package};
//!
//! let options = LoadOptions::default();
//! let mut root = load_package("docs/regpy".as_ref(), &options)?;
//! link_inheritance(&mut root, DocstringMode::Declared)?;
//! ```

mod error;
mod linker;
mod loader;
mod metadata;
mod module;

pub use error::ModelError;
pub use linker::{DocstringMode, link_inheritance};
pub use loader::{LoadOptions, load_package};
pub use metadata::{MemberSpec, ModuleMetadata};
pub use module::{Member, MemberKind, Module};
