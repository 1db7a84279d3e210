//! Writing the generated document to disk.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

/// File name of the generated document.
pub const MODULE_FILE_NAME: &str = "module.json";

/// Output directory used when none is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "target/publications/maven";

/// Write `bytes` to `module.json` inside `output_dir`, creating the
/// directory if needed.
///
/// The bytes go to a temporary file in the same directory which is then
/// renamed over the target, so readers never observe a partially written
/// document and a failed write leaves any previous file untouched.
///
/// # Errors
///
/// Returns an I/O error if the directory cannot be created or the file
/// cannot be written or renamed.
pub fn write_module_file(output_dir: &Path, bytes: &[u8]) -> io::Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let target = output_dir.join(MODULE_FILE_NAME);

    let mut temp = NamedTempFile::new_in(output_dir)?;
    temp.write_all(bytes)?;
    temp.flush()?;
    temp.persist(&target).map_err(|e| e.error)?;

    debug!("Wrote {} bytes to {}", bytes.len(), target.display());
    Ok(target)
}
