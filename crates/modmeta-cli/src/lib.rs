//! modmeta - module metadata generator
//!
//! Command-line front end for [`modmeta_core`]. The host build hands over a
//! TOML project descriptor; `modmeta generate` turns it into `module.json`
//! next to the other publications.

pub mod cmd;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level command line.
#[derive(Debug, Parser)]
#[command(name = "modmeta")]
#[command(author, version, about = "modmeta - module metadata generator")]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate module metadata from a project descriptor
    Generate(cmd::generate::GenerateArgs),
    /// Print the published checksums of files
    Hash {
        /// Files to hash
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Only print this algorithm (md5, sha1, sha256, sha512)
        #[arg(long, short)]
        algorithm: Option<String>,
    },
}
