//! TOML project descriptors.
//!
//! A descriptor file is the hand-off point from the host build:
//!
//! ```toml
//! group = "org.example"
//! module = "lib"
//! version = "1.0"
//!
//! [artifact]
//! path = "target/lib-1.0.jar"
//!
//! [[dependencies]]
//! group = "org.slf4j"
//! module = "slf4j-api"
//! version = "2.0.9"
//! scope = "compile"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use modmeta_schema::ProjectDescriptor;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading a descriptor.
#[derive(Error, Debug)]
pub enum DescriptorError {
    /// The descriptor file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Descriptor location.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be deserialized into a descriptor.
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Parse a descriptor from TOML text.
///
/// # Errors
///
/// Returns [`DescriptorError::Parse`] for malformed TOML or mistyped fields.
pub fn parse(content: &str) -> Result<ProjectDescriptor, DescriptorError> {
    Ok(toml::from_str(content)?)
}

/// Load a descriptor file.
///
/// A relative artifact path is resolved against the descriptor's directory.
///
/// # Errors
///
/// Returns [`DescriptorError::Io`] if the file cannot be read, or
/// [`DescriptorError::Parse`] if it is not a valid descriptor.
pub fn load(path: &Path) -> Result<ProjectDescriptor, DescriptorError> {
    let content = fs::read_to_string(path).map_err(|source| DescriptorError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut descriptor = parse(&content)?;

    let artifact = &descriptor.artifact.path;
    if artifact.is_relative() && !artifact.as_os_str().is_empty() {
        let base = path.parent().unwrap_or(Path::new(""));
        descriptor.artifact.path = base.join(artifact);
    }

    debug!(
        "Loaded descriptor {}:{}:{} with {} dependencies",
        descriptor.group,
        descriptor.module,
        descriptor.version,
        descriptor.dependencies.len()
    );
    Ok(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use modmeta_schema::{Coordinate, Scope};

    const EXAMPLE_DESCRIPTOR: &str = r#"
group = "org.example"
module = "lib"
version = "1.0-SNAPSHOT"

[artifact]
path = "target/lib.jar"
classifier = "all"

[[dependencies]]
group = "org.slf4j"
module = "slf4j-api"
version = "2.0.9"
scope = "compile"

[[dependencies]]
group = "org.example"
module = "natives"
scope = "runtime"
type = "zip"
classifier = "linux"
exclusions = [{ group = "x", module = "y" }]

[[dependencies]]
group = "org.example"
module = "legacy"
scope = "compile+runtime"
optional = true

[[platform_dependencies]]
group = "org.example"
module = "bom"
version = "3.0"

[[capabilities]]
group = "org.example"
name = "lib-api"

[[removed_dependencies]]
group = "org.shaded"
module = "inlined"
version = "1.0"
"#;

    #[test]
    fn test_parse_descriptor() {
        let descriptor = parse(EXAMPLE_DESCRIPTOR).unwrap();

        assert_eq!(descriptor.group, "org.example");
        assert_eq!(descriptor.packaging, "jar");
        assert_eq!(descriptor.artifact.classifier.as_deref(), Some("all"));
        assert_eq!(descriptor.dependencies.len(), 3);

        let natives = &descriptor.dependencies[1];
        assert_eq!(natives.scope, Some(Scope::Runtime));
        assert_eq!(natives.artifact_type(), "zip");
        assert_eq!(natives.classifier(), Some("linux"));
        assert_eq!(natives.exclusions, vec![Coordinate::new("x", "y")]);

        let legacy = &descriptor.dependencies[2];
        assert_eq!(legacy.scope, Some(Scope::Compile));
        assert!(legacy.optional);

        assert_eq!(descriptor.platform_dependencies[0].scope, None);
        assert_eq!(descriptor.capabilities[0].version, None);
        assert_eq!(
            descriptor.removed_dependencies,
            vec![Coordinate::new("org.shaded", "inlined")]
        );
    }

    #[test]
    fn test_parse_missing_identity_defaults_to_empty() {
        let descriptor = parse("packaging = \"pom\"").unwrap();
        assert!(descriptor.group.is_empty());
        assert_eq!(descriptor.packaging, "pom");
    }

    #[test]
    fn test_parse_malformed_toml() {
        assert!(matches!(
            parse("this is not valid toml {{{"),
            Err(DescriptorError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_unknown_scope() {
        let content = r#"
[[dependencies]]
group = "g"
module = "m"
scope = "sometimes"
"#;
        assert!(parse(content).is_err());
    }

    #[test]
    fn test_load_resolves_relative_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("module.toml");
        fs::write(&path, EXAMPLE_DESCRIPTOR).unwrap();

        let descriptor = load(&path).unwrap();
        assert_eq!(descriptor.artifact.path, dir.path().join("target/lib.jar"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, DescriptorError::Io { .. }));
    }
}
