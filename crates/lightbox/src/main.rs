//! Lightbox CLI - enlargeable image directive.
//!
//! Provides commands for:
//! - `render`: Render one document for one target to stdout
//! - `check`: Report directive diagnostics, failing on rejected directives
//! - `build`: Render the whole source tree for every configured target
//! - `assets`: Write the stylesheet and behavior script

mod commands;
mod error;
mod output;
mod sources;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AssetsArgs, BuildArgs, CheckArgs, RenderArgs};
use output::Output;

/// Lightbox - enlargeable images for multi-target documentation.
#[derive(Parser)]
#[command(name = "lightbox", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one document to stdout.
    Render(RenderArgs),
    /// Check directives and report diagnostics.
    Check(CheckArgs),
    /// Build every configured target.
    Build(BuildArgs),
    /// Write the static stylesheet and script.
    Assets(AssetsArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Render(args) => args.project.verbose,
            Self::Check(args) => args.project.verbose,
            Self::Build(args) => args.project.verbose,
            Self::Assets(_) => false,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG. Directive
    // diagnostics are printed by the commands, so the renderer stays quiet
    // by default.
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn,lightbox_renderer=off"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Check(args) => args.execute(),
        Commands::Build(args) => args.execute(),
        Commands::Assets(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
