//! Rendering errors.

use thiserror::Error;

/// Errors produced while rendering a page.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Formatting into the page buffer failed.
    #[error("failed to format page: {0}")]
    Fmt(#[from] std::fmt::Error),
}
