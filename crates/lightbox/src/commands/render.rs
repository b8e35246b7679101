//! `lightbox render` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use lightbox_config::CliSettings;
use lightbox_renderer::{ImageRegistry, Target};

use super::ProjectArgs;
use crate::error::CliError;
use crate::output::Output;
use crate::sources;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Document to render (path, or name relative to the source directory).
    document: PathBuf,

    /// Output target.
    #[arg(short, long, default_value = "html")]
    target: Target,

    /// Output directory of collected images (overrides config).
    #[arg(long)]
    images_dir: Option<String>,

    #[command(flatten)]
    pub project: ProjectArgs,
}

impl RenderArgs {
    /// Render one document and print it to stdout.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let project = self.project.load(CliSettings::default())?;

        let path = sources::resolve_document(&project.source_dir, &self.document)?;
        let source = sources::read_document(&project.source_dir, &path)?;
        for diagnostic in &source.diagnostics {
            output.diagnostic(diagnostic);
        }

        let mut registry = ImageRegistry::new();
        source.document.collect_assets(&mut registry);

        let images_dir = self
            .images_dir
            .as_deref()
            .unwrap_or(&project.config.build_resolved.images_dir);
        let rendered = source.document.render(self.target, &registry, images_dir)?;

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(rendered.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}
