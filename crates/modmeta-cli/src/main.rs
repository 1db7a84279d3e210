//! modmeta - module metadata generator

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use modmeta_cli::cmd;
use modmeta_cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout may carry the document, so log to stderr
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Generate(args) => cmd::generate::generate(&args),
        Commands::Hash { files, algorithm } => cmd::hash::hash(&files, algorithm.as_deref()),
    }
}
