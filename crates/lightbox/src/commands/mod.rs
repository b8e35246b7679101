//! CLI command implementations.

pub(crate) mod assets;
pub(crate) mod build;
pub(crate) mod check;
pub(crate) mod render;

use std::path::PathBuf;

use clap::Args;
use lightbox_config::{CliSettings, Config};

use crate::error::CliError;

pub(crate) use assets::AssetsArgs;
pub(crate) use build::BuildArgs;
pub(crate) use check::CheckArgs;
pub(crate) use render::RenderArgs;

/// Options shared by commands that read the source tree.
#[derive(Args)]
pub(crate) struct ProjectArgs {
    /// Path to configuration file (default: auto-discover lightbox.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long, env = "LIGHTBOX_SOURCE_DIR")]
    source_dir: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Loaded configuration with the canonical source root.
pub(crate) struct Project {
    pub config: Config,
    pub source_dir: PathBuf,
}

impl ProjectArgs {
    /// Load the configuration, applying `settings` over the shared options.
    pub(crate) fn load(&self, settings: CliSettings) -> Result<Project, CliError> {
        let settings = CliSettings {
            source_dir: self.source_dir.clone().or(settings.source_dir),
            ..settings
        };
        let config = Config::load(self.config.as_deref(), Some(&settings))?;

        let source_dir = std::fs::canonicalize(&config.docs_resolved.source_dir).map_err(|e| {
            CliError::Validation(format!(
                "Source directory {}: {e}",
                config.docs_resolved.source_dir.display()
            ))
        })?;

        Ok(Project { config, source_dir })
    }
}
