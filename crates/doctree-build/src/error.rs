//! Build errors.

use std::path::PathBuf;

use doctree_render::RenderError;
use thiserror::Error;

/// Errors produced while writing the documentation tree.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Rendering a module's page failed.
    #[error("failed to render page for module '{module}': {source}")]
    Render {
        module: String,
        source: RenderError,
    },

    /// Creating an output directory failed.
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing a page file failed.
    #[error("failed to write page {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Deleting a failed page left the output in an unknown state.
    #[error("failed to clean up partial page {path}: {source}")]
    Cleanup {
        path: PathBuf,
        source: std::io::Error,
    },
}
