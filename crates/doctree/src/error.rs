//! CLI error types.

use doctree_build::BuildError;
use doctree_config::ConfigError;
use doctree_model::ModelError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Model(#[from] ModelError),

    #[error("{0}")]
    Build(#[from] BuildError),
}
