//! Generate command

use anyhow::{Context, Result};
use clap::Args;
use modmeta_core::generator::{DEFAULT_SNAPSHOT_MARKER, GenerateOptions};
use modmeta_core::marker::{self, DEFAULT_MARKER};
use modmeta_core::output::{self, DEFAULT_OUTPUT_DIR};
use modmeta_core::{Creator, descriptor, generate as generate_document};
use std::io::Write;
use std::path::PathBuf;

/// Arguments of `modmeta generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Project descriptor (TOML)
    pub descriptor: PathBuf,

    /// Directory that receives module.json
    #[arg(long, env = "MODMETA_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Tool name recorded under createdBy
    #[arg(long, env = "MODMETA_TOOL", default_value = "modmeta")]
    pub tool: String,

    /// Tool version recorded under createdBy
    #[arg(long, env = "MODMETA_TOOL_VERSION", default_value = env!("CARGO_PKG_VERSION"))]
    pub tool_version: String,

    /// Version suffix that marks an integration build
    #[arg(long, env = "MODMETA_SNAPSHOT_MARKER", default_value = DEFAULT_SNAPSHOT_MARKER)]
    pub snapshot_marker: String,

    /// Build file that must contain the publication marker
    #[arg(long)]
    pub marker_file: Option<PathBuf>,

    /// Marker text looked for in --marker-file
    #[arg(long, default_value = DEFAULT_MARKER)]
    pub marker: String,

    /// Write the document to stdout instead of the output directory
    #[arg(long)]
    pub stdout: bool,
}

impl GenerateArgs {
    fn options(&self) -> GenerateOptions {
        GenerateOptions {
            creator: Creator::new(&self.tool, &self.tool_version),
            snapshot_marker: self.snapshot_marker.clone(),
            ..GenerateOptions::default()
        }
    }
}

/// Generate module metadata for the descriptor in `args`.
///
/// # Errors
///
/// Fails if the descriptor cannot be loaded, the marker is missing,
/// generation fails, or the document cannot be written.
pub fn generate(args: &GenerateArgs) -> Result<()> {
    let descriptor = descriptor::load(&args.descriptor)
        .with_context(|| format!("Failed to load descriptor {}", args.descriptor.display()))?;
    let options = args.options();

    if options.is_platform_packaging(&descriptor.packaging) {
        if !args.stdout {
            println!(
                "Skipping module metadata: {} packaging describes a platform",
                descriptor.packaging
            );
        }
        return Ok(());
    }

    if let Some(marker_file) = &args.marker_file {
        marker::ensure_marker(marker_file, &args.marker)?;
    }

    let bytes = generate_document(&descriptor, &options).with_context(|| {
        format!(
            "Failed to generate module metadata for {}:{}",
            descriptor.group, descriptor.module
        )
    })?;
    let Some(bytes) = bytes else {
        return Ok(());
    };

    if args.stdout {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&bytes)?;
        stdout.flush()?;
    } else {
        let path = output::write_module_file(&args.output_dir, &bytes).with_context(|| {
            format!("Error creating module metadata in {}", args.output_dir.display())
        })?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}
