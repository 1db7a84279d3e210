//! Publication marker check.
//!
//! Consumers only look for module metadata next to a build file that
//! announces it, so publishing is refused until the build file carries the
//! marker comment.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Marker text expected in the build file.
pub const DEFAULT_MARKER: &str = "do_not_remove: published-with-gradle-metadata";

/// Errors raised by [`ensure_marker`].
#[derive(Error, Debug)]
pub enum MarkerError {
    /// The build file does not contain the marker.
    #[error("Please add the module metadata marker '<!-- {marker} -->' to {}", path.display())]
    Missing {
        /// Expected marker text.
        marker: String,
        /// Build file that was searched.
        path: PathBuf,
    },

    /// The build file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Build file location.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Check that some line of the file at `path` contains `marker`.
///
/// # Errors
///
/// Returns [`MarkerError::Missing`] if no line contains the marker, or
/// [`MarkerError::Io`] if the file cannot be read.
pub fn ensure_marker(path: &Path, marker: &str) -> Result<(), MarkerError> {
    let io_error = |source| MarkerError::Io {
        path: path.to_path_buf(),
        source,
    };

    let reader = BufReader::new(File::open(path).map_err(io_error)?);
    for line in reader.lines() {
        if line.map_err(io_error)?.contains(marker) {
            return Ok(());
        }
    }

    Err(MarkerError::Missing {
        marker: marker.to_string(),
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn marker_present() {
        let dir = tempfile::tempdir().unwrap();
        let pom = dir.path().join("pom.xml");
        fs::write(
            &pom,
            "<project>\n  <!-- do_not_remove: published-with-gradle-metadata -->\n</project>\n",
        )
        .unwrap();
        ensure_marker(&pom, DEFAULT_MARKER).unwrap();
    }

    #[test]
    fn marker_missing() {
        let dir = tempfile::tempdir().unwrap();
        let pom = dir.path().join("pom.xml");
        fs::write(&pom, "<project/>\n").unwrap();

        let err = ensure_marker(&pom, DEFAULT_MARKER).unwrap_err();
        assert!(matches!(err, MarkerError::Missing { .. }));
        assert!(err.to_string().contains(DEFAULT_MARKER));
    }

    #[test]
    fn unreadable_build_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ensure_marker(&dir.path().join("pom.xml"), DEFAULT_MARKER).unwrap_err();
        assert!(matches!(err, MarkerError::Io { .. }));
    }
}
