//! CLI error types.

use lightbox_config::ConfigError;
use lightbox_renderer::RenderError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{count} lightbox directive(s) failed")]
    Failed { count: usize },

    #[error("{0}")]
    Validation(String),
}
