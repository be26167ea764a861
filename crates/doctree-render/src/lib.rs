//! HTML page rendering for documentation module trees.
//!
//! This crate turns [`doctree_model::Module`] nodes into standalone HTML
//! pages. Module docstrings are markdown and go through
//! [`MarkdownRenderer`]; [`PageRenderer`] wraps the rendered body in a full
//! page with title, breadcrumb navigation, member listing and submodule
//! index.

mod error;
mod markdown;
mod options;
mod page;

pub use error::RenderError;
pub use markdown::{MarkdownRenderer, escape_html};
pub use options::RenderOptions;
pub use page::PageRenderer;
