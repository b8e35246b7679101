//! `lightbox assets` command implementation.

use std::path::PathBuf;

use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the assets command.
#[derive(Args)]
pub(crate) struct AssetsArgs {
    /// Directory to write `lightbox.css` and `lightbox.js` into.
    #[arg(short, long)]
    out: PathBuf,
}

impl AssetsArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let written = lightbox_assets::write_all(&self.out)?;
        for path in &written {
            let mime = lightbox_assets::mime_for(&path.to_string_lossy());
            output.info(&format!("Wrote {} ({mime})", path.display()));
        }

        output.success(&format!(
            "{} asset(s) written to {}",
            written.len(),
            self.out.display()
        ));
        Ok(())
    }
}
