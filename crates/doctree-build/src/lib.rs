//! Writing rendered documentation trees to disk.
//!
//! [`TreeWriter`] walks a module tree depth first and writes one HTML file
//! per module under an output root. Each module's file path is derived from
//! its qualified name: packages become `<path>/index.html`, leaf modules
//! become `<path>.html`. A failed page is deleted before the build aborts,
//! so the output never contains a truncated file.

mod error;
mod writer;

pub use error::BuildError;
pub use writer::{PageSource, TreeWriter};
