//! Digest algorithm identifiers and finished digest values.

use std::fmt;
use std::str::FromStr;

/// Digest algorithms the checksum engine supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// MD5 (16-byte digest).
    Md5,
    /// SHA-1 (20-byte digest).
    Sha1,
    /// SHA-256 (32-byte digest).
    Sha256,
    /// SHA-512 (64-byte digest).
    Sha512,
}

impl HashAlgorithm {
    /// All algorithms, in the order the document lists them.
    pub const ALL: [Self; 4] = [Self::Sha512, Self::Sha256, Self::Sha1, Self::Md5];

    /// Lowercase name, as used for the document's file keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an algorithm identifier outside the supported set.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported digest algorithm: {0}")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for HashAlgorithm {
    type Err = UnknownAlgorithm;

    /// Accepts `md5`, `sha1`, `sha256`, `sha512`, with or without a dash
    /// after `sha`, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "md5" => Ok(Self::Md5),
            "sha1" | "sha-1" => Ok(Self::Sha1),
            "sha256" | "sha-256" => Ok(Self::Sha256),
            "sha512" | "sha-512" => Ok(Self::Sha512),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

/// A finished digest.
///
/// The hex rendering treats the digest as an unsigned big-endian integer, so
/// leading zero nibbles are dropped: a SHA-1 starting with `0x0a` renders as
/// `a...` and is 39 characters long, not 40. Consumers compare these strings
/// verbatim, so this must not be "fixed" to zero-padded hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HashValue(Vec<u8>);

impl HashValue {
    /// Wrap raw digest bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Base-16 rendering of the digest as an unsigned integer.
    pub fn as_hex_string(&self) -> String {
        let hex = hex::encode(&self.0);
        match hex.trim_start_matches('0') {
            "" => "0".to_string(),
            trimmed => trimmed.to_string(),
        }
    }
}

impl fmt::Display for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_hex_string())
    }
}
