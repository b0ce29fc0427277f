//! CLI error types.

use dbos_docs_config::ConfigError;
use dbos_docs_manifest::{ExtractError, ManifestError};
use dbos_docs_plugins::{PluginError, PostBuildError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Manifest(#[from] ManifestError),

    #[error("{0}")]
    Extract(#[from] ExtractError),

    #[error("{0}")]
    Plugin(#[from] PluginError),

    #[error("{0}")]
    PostBuild(#[from] PostBuildError),
}
