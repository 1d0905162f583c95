//! Hirelog CLI - classify job-application emails and serve the results.

use anyhow::Context;
use clap::Parser;
use hirelog_cli::commands;
use hirelog_cli::{AppConfig, Cli, Command, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    // Initialize tracing (log to stderr)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("loading configuration from {}", path.display()),
        None => "building default configuration".to_string(),
    })?;

    let format = cli.format.map(Into::into).unwrap_or(config.output.format);
    let color_enabled = !cli.no_color && config.output.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Classify(args) => commands::execute_classify(args, &config, &formatter).await?,
        Command::Serve(args) => commands::execute_serve(args, &config, &formatter).await?,
        Command::Export(args) => commands::execute_export(args, &formatter)?,
    }

    Ok(())
}
