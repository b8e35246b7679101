//! `lightbox check` command implementation.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use lightbox_config::CliSettings;
use lightbox_renderer::Diagnostic;
use rayon::prelude::*;

use super::ProjectArgs;
use crate::error::CliError;
use crate::output::Output;
use crate::sources::{self, SourceDocument};

/// Diagnostic output format.
#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Documents to check (default: every document in the source directory).
    documents: Vec<PathBuf>,

    /// Diagnostic output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    #[command(flatten)]
    pub project: ProjectArgs,
}

impl CheckArgs {
    /// Read documents and report every directive diagnostic.
    ///
    /// Fails when any directive was rejected.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let project = self.project.load(CliSettings::default())?;

        let paths = if self.documents.is_empty() {
            sources::discover(&project.source_dir)?
        } else {
            self.documents
                .iter()
                .map(|doc| sources::resolve_document(&project.source_dir, doc))
                .collect::<Result<_, _>>()?
        };

        let documents = paths
            .par_iter()
            .map(|path| sources::read_document(&project.source_dir, path))
            .collect::<Result<Vec<SourceDocument>, _>>()?;

        let diagnostics: Vec<&Diagnostic> =
            documents.iter().flat_map(|d| &d.diagnostics).collect();
        let errors = diagnostics.iter().filter(|d| d.kind.is_error()).count();

        match self.format {
            Format::Text => {
                for diagnostic in &diagnostics {
                    output.diagnostic(diagnostic);
                }
                output.info(&format!(
                    "Checked {} document(s): {errors} error(s), {} warning(s)",
                    documents.len(),
                    diagnostics.len() - errors
                ));
            }
            Format::Json => {
                let mut stdout = std::io::stdout().lock();
                serde_json::to_writer_pretty(&mut stdout, &diagnostics)?;
                std::io::Write::write_all(&mut stdout, b"\n")?;
            }
        }

        if errors > 0 {
            return Err(CliError::Failed { count: errors });
        }
        Ok(())
    }
}
