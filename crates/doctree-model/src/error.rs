//! Model error types.

use std::path::PathBuf;

/// Error returned while loading or linking a module tree.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Package source directory not found.
    #[error("Package directory not found: {}", .0.display())]
    PackageNotFound(PathBuf),

    /// I/O error reading a source or sidecar file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Sidecar metadata could not be parsed.
    #[error("Invalid metadata in {}: {message}", .path.display())]
    Metadata {
        /// Path to the sidecar file.
        path: PathBuf,
        /// Parser error message.
        message: String,
    },

    /// A `requires` entry names a module that is neither in the tree nor
    /// declared absent.
    #[error("Module {module} requires {name}, which is not in the tree and not declared absent")]
    UnresolvedRequire {
        /// Qualified name of the requiring module.
        module: String,
        /// The unresolved requirement.
        name: String,
    },

    /// An `inherits` entry names a module that does not exist.
    #[error("Module {module} inherits from unknown module {target}")]
    DanglingInherit {
        /// Qualified name of the inheriting module.
        module: String,
        /// The missing inheritance target.
        target: String,
    },
}
