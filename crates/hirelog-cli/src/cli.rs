//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Hirelog - classify job-application emails and serve the results.
#[derive(Debug, Parser)]
#[command(name = "hirelog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "HIRELOG_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (company and status only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify a batch of emails with the language model
    Classify(ClassifyArgs),

    /// Serve applications over gRPC
    Serve(ServeArgs),

    /// Convert a snapshot to CSV
    Export(ExportArgs),
}

/// Arguments for the classify command.
#[derive(Debug, Parser)]
pub struct ClassifyArgs {
    /// Snapshot, script response or raw record array to classify
    #[arg(short, long)]
    pub input: PathBuf,

    /// Override the configured concurrency ceiling
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Skip writing the `_llm.json` / `_llm.csv` outputs
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the serve command.
#[derive(Debug, Parser)]
pub struct ServeArgs {
    /// Snapshot to seed the store with
    #[arg(short, long)]
    pub snapshot: Option<PathBuf>,

    /// Listen address (overrides the configuration)
    #[arg(long)]
    pub addr: Option<String>,

    /// Listen port (overrides the configuration)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for the export command.
#[derive(Debug, Parser)]
pub struct ExportArgs {
    /// Snapshot to read
    #[arg(short, long)]
    pub input: PathBuf,

    /// CSV file to write
    #[arg(long)]
    pub csv: PathBuf,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
