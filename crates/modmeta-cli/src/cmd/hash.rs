//! Hash command

use anyhow::{Context, Result};
use modmeta_core::checksum::{self, Checksums};
use modmeta_schema::HashAlgorithm;
use std::path::PathBuf;

/// Print checksums of `files`, one `<algorithm> <hex> <path>` line each.
///
/// Without `algorithm`, all four published digests are printed.
///
/// # Errors
///
/// Fails on an unknown algorithm name, before any file is read, or on an
/// unreadable file.
pub fn hash(files: &[PathBuf], algorithm: Option<&str>) -> Result<()> {
    let algorithm = algorithm
        .map(str::parse::<HashAlgorithm>)
        .transpose()?;

    for file in files {
        match algorithm {
            Some(algorithm) => {
                let value = checksum::hash_file(file, algorithm)?;
                println!("{algorithm} {value} {}", file.display());
            }
            None => {
                let sums = Checksums::compute(file)
                    .with_context(|| format!("Failed to hash {}", file.display()))?;
                for (algorithm, value) in sums.iter() {
                    println!("{algorithm} {value} {}", file.display());
                }
            }
        }
    }
    Ok(())
}
