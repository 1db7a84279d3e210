//! Streaming checksum engine.
//!
//! Files are read in fixed-size chunks so artifacts of any size can be
//! hashed without loading them into memory.

use md5::Md5;
use modmeta_schema::{HashAlgorithm, HashValue};
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};
use std::fs::File;
use std::io::{self, ErrorKind, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const CHUNK_SIZE: usize = 64 * 1024;

/// Errors raised while computing checksums.
#[derive(Error, Debug)]
pub enum ChecksumError {
    /// The file could not be opened or read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File being hashed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Feed `reader` to `sink` chunk by chunk until end of stream.
fn pump<R: Read>(mut reader: R, mut sink: impl FnMut(&[u8])) -> io::Result<()> {
    let mut buffer = vec![0u8; CHUNK_SIZE];
    loop {
        let bytes_read = match reader.read(&mut buffer) {
            Ok(0) => return Ok(()),
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        sink(&buffer[..bytes_read]);
    }
}

fn digest_reader<D: Digest, R: Read>(reader: R) -> io::Result<HashValue> {
    let mut hasher = D::new();
    pump(reader, |chunk| hasher.update(chunk))?;
    Ok(HashValue::new(hasher.finalize().to_vec()))
}

/// Hash everything `reader` yields with `algorithm`.
///
/// # Errors
///
/// Returns the reader's I/O error.
pub fn hash_reader<R: Read>(reader: R, algorithm: HashAlgorithm) -> io::Result<HashValue> {
    match algorithm {
        HashAlgorithm::Md5 => digest_reader::<Md5, _>(reader),
        HashAlgorithm::Sha1 => digest_reader::<Sha1, _>(reader),
        HashAlgorithm::Sha256 => digest_reader::<Sha256, _>(reader),
        HashAlgorithm::Sha512 => digest_reader::<Sha512, _>(reader),
    }
}

fn open(path: &Path) -> Result<File, ChecksumError> {
    File::open(path).map_err(|source| ChecksumError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Hash the file at `path` with `algorithm`.
///
/// # Errors
///
/// Returns [`ChecksumError::Io`] if the file cannot be opened or read.
pub fn hash_file(path: &Path, algorithm: HashAlgorithm) -> Result<HashValue, ChecksumError> {
    debug!("Computing {algorithm} of {}", path.display());
    let file = open(path)?;
    hash_reader(file, algorithm).map_err(|source| ChecksumError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// The four digests published for every artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checksums {
    /// SHA-512 digest.
    pub sha512: HashValue,
    /// SHA-256 digest.
    pub sha256: HashValue,
    /// SHA-1 digest.
    pub sha1: HashValue,
    /// MD5 digest.
    pub md5: HashValue,
}

impl Checksums {
    /// Compute all four digests in a single pass over `reader`.
    ///
    /// # Errors
    ///
    /// Returns the reader's I/O error.
    pub fn from_reader<R: Read>(reader: R) -> io::Result<Self> {
        let mut sha512 = Sha512::new();
        let mut sha256 = Sha256::new();
        let mut sha1 = Sha1::new();
        let mut md5 = Md5::new();

        pump(reader, |chunk| {
            sha512.update(chunk);
            sha256.update(chunk);
            sha1.update(chunk);
            md5.update(chunk);
        })?;

        Ok(Self {
            sha512: HashValue::new(sha512.finalize().to_vec()),
            sha256: HashValue::new(sha256.finalize().to_vec()),
            sha1: HashValue::new(sha1.finalize().to_vec()),
            md5: HashValue::new(md5.finalize().to_vec()),
        })
    }

    /// Compute all four digests of the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ChecksumError::Io`] if the file cannot be opened or read.
    pub fn compute(path: &Path) -> Result<Self, ChecksumError> {
        debug!("Computing checksums of {}", path.display());
        let file = open(path)?;
        Self::from_reader(file).map_err(|source| ChecksumError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The digest for `algorithm`.
    pub fn get(&self, algorithm: HashAlgorithm) -> &HashValue {
        match algorithm {
            HashAlgorithm::Sha512 => &self.sha512,
            HashAlgorithm::Sha256 => &self.sha256,
            HashAlgorithm::Sha1 => &self.sha1,
            HashAlgorithm::Md5 => &self.md5,
        }
    }

    /// Digests paired with their algorithm, in document order.
    pub fn iter(&self) -> impl Iterator<Item = (HashAlgorithm, &HashValue)> {
        HashAlgorithm::ALL
            .into_iter()
            .map(move |algorithm| (algorithm, self.get(algorithm)))
    }
}
