//! CLI error types.

use adflens::{AdfError, ConfigError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Adf(#[from] AdfError),

    #[error("cannot read {path}: {source}")]
    Input {
        path: String,
        source: std::io::Error,
    },
}
