//! Module metadata generation.
//!
//! [`generate`] is a pure function of the descriptor, the options and the
//! bytes of the produced artifact. The document is assembled completely in
//! memory, so a failure never yields a partial document.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use modmeta_schema::document::{
    ArtifactSelector, Attributes, CapabilityEntry, Component, DependencyEntry, FORMAT_VERSION,
    FileEntry, ModuleDocument, ThirdPartyCompatibility, ToolVersion, VariantEntry,
    VersionConstraint, attributes,
};
use modmeta_schema::{Dependency, ProjectDescriptor};
use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use thiserror::Error;
use tracing::{debug, info};

use crate::checksum::{ChecksumError, Checksums};
use crate::variant::Variant;

/// Version suffix that marks an integration build.
pub const DEFAULT_SNAPSHOT_MARKER: &str = "SNAPSHOT";

/// Packagings that describe a platform (BOM) rather than a library.
pub const DEFAULT_PLATFORM_PACKAGINGS: [&str; 2] = ["pom", "platform-aggregate"];

/// Errors that abort generation.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// A required descriptor field is empty.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The artifact path does not name a file.
    #[error("Invalid artifact path: {}", .0.display())]
    InvalidArtifactPath(PathBuf),

    /// The artifact could not be inspected.
    #[error("Failed to read artifact {}: {source}", path.display())]
    Artifact {
        /// Artifact location.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Hashing the artifact failed.
    #[error(transparent)]
    Checksum(#[from] ChecksumError),

    /// The document could not be serialized.
    #[error("Failed to serialize module metadata: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The tool recorded under `createdBy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Creator {
    /// Tool name, used as the key.
    pub tool: String,
    /// Tool version, written verbatim.
    pub version: String,
}

impl Creator {
    /// Create a creator entry.
    pub fn new(tool: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            version: version.into(),
        }
    }
}

impl Default for Creator {
    fn default() -> Self {
        Self::new("modmeta", env!("CARGO_PKG_VERSION"))
    }
}

/// Tunables for a generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Tool recorded under `createdBy`.
    pub creator: Creator,
    /// Version suffix that marks an integration build.
    pub snapshot_marker: String,
    /// Packagings for which no document is produced.
    pub platform_packagings: Vec<String>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            creator: Creator::default(),
            snapshot_marker: DEFAULT_SNAPSHOT_MARKER.to_string(),
            platform_packagings: DEFAULT_PLATFORM_PACKAGINGS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl GenerateOptions {
    /// True if `packaging` describes a platform, which gets no document.
    pub fn is_platform_packaging(&self, packaging: &str) -> bool {
        self.platform_packagings.iter().any(|p| p == packaging)
    }

    /// Status attribute value for `version`.
    ///
    /// An empty snapshot marker marks nothing, so every version is a release.
    pub fn status(&self, version: &str) -> &'static str {
        if !self.snapshot_marker.is_empty() && version.ends_with(&self.snapshot_marker) {
            attributes::STATUS_INTEGRATION
        } else {
            attributes::STATUS_RELEASE
        }
    }
}

/// Two-space pretty printer that also escapes U+2028 and U+2029, which
/// `serde_json` otherwise writes raw.
struct DocumentFormatter<'a>(PrettyFormatter<'a>);

impl DocumentFormatter<'_> {
    fn new() -> Self {
        Self(PrettyFormatter::with_indent(b"  "))
    }
}

impl Formatter for DocumentFormatter<'_> {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut start = 0;
        for (index, ch) in fragment.char_indices() {
            let escape: &[u8] = match ch {
                '\u{2028}' => b"\\u2028",
                '\u{2029}' => b"\\u2029",
                _ => continue,
            };
            writer.write_all(&fragment.as_bytes()[start..index])?;
            writer.write_all(escape)?;
            start = index + ch.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}

/// Serialize `document` with two-space indentation and one trailing newline.
///
/// # Errors
///
/// Returns [`GenerateError::Serialize`] if serialization fails.
pub fn to_bytes(document: &ModuleDocument) -> Result<Vec<u8>, GenerateError> {
    let mut bytes = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut bytes, DocumentFormatter::new());
    document.serialize(&mut serializer)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Generate the serialized document for `descriptor`.
///
/// Returns `Ok(None)` for platform packagings. Otherwise returns the
/// pretty-printed JSON (two-space indent) followed by one newline.
///
/// # Errors
///
/// Fails on missing required fields, an unreadable artifact, or a
/// serialization failure. No bytes are returned on failure.
pub fn generate(
    descriptor: &ProjectDescriptor,
    options: &GenerateOptions,
) -> Result<Option<Vec<u8>>, GenerateError> {
    if options.is_platform_packaging(&descriptor.packaging) {
        info!(
            "Skipping module metadata for {}:{} ({} packaging)",
            descriptor.group, descriptor.module, descriptor.packaging
        );
        return Ok(None);
    }

    let document = build_document(descriptor, options)?;
    let bytes = to_bytes(&document)?;

    info!(
        "Generated module metadata for {}:{}:{} ({} bytes)",
        descriptor.group,
        descriptor.module,
        descriptor.version,
        bytes.len()
    );
    Ok(Some(bytes))
}

/// Build the document model for `descriptor` without serializing it.
///
/// Platform packaging is not checked here; see [`generate`].
///
/// # Errors
///
/// Same as [`generate`], minus serialization.
pub fn build_document(
    descriptor: &ProjectDescriptor,
    options: &GenerateOptions,
) -> Result<ModuleDocument, GenerateError> {
    validate(descriptor)?;

    let file = file_entry(descriptor)?;
    let variants = Variant::ALL
        .into_iter()
        .map(|variant| variant_entry(variant, descriptor, &file))
        .collect();

    let mut created_by = BTreeMap::new();
    created_by.insert(
        options.creator.tool.clone(),
        ToolVersion {
            version: options.creator.version.clone(),
        },
    );

    Ok(ModuleDocument {
        format_version: FORMAT_VERSION.to_string(),
        component: Component {
            group: descriptor.group.clone(),
            module: descriptor.module.clone(),
            version: descriptor.version.clone(),
            attributes: Attributes::from([(
                attributes::STATUS.to_string(),
                options.status(&descriptor.version).to_string(),
            )]),
        },
        created_by,
        variants,
    })
}

fn validate(descriptor: &ProjectDescriptor) -> Result<(), GenerateError> {
    let required = [
        ("group", descriptor.group.is_empty()),
        ("module", descriptor.module.is_empty()),
        ("version", descriptor.version.is_empty()),
        ("artifact.path", descriptor.artifact.path.as_os_str().is_empty()),
    ];
    match required.into_iter().find(|(_, missing)| *missing) {
        Some((field, _)) => Err(GenerateError::MissingField(field)),
        None => Ok(()),
    }
}

/// Render the published file name of the artifact at `path`:
/// `<module>-<version>[-<classifier>].<extension>`.
///
/// The extension is whatever follows the last `.` of the file name. A file
/// name without a `.` is returned unchanged.
///
/// # Errors
///
/// Returns [`GenerateError::InvalidArtifactPath`] if `path` has no UTF-8
/// file name.
pub fn artifact_file_name(
    module: &str,
    version: &str,
    classifier: Option<&str>,
    path: &Path,
) -> Result<String, GenerateError> {
    let original = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| GenerateError::InvalidArtifactPath(path.to_path_buf()))?;

    let Some((_, extension)) = original.rsplit_once('.') else {
        return Ok(original.to_string());
    };

    let mut name = format!("{module}-{version}");
    if let Some(classifier) = classifier.filter(|c| !c.is_empty()) {
        name.push('-');
        name.push_str(classifier);
    }
    name.push('.');
    name.push_str(extension);
    Ok(name)
}

fn file_entry(descriptor: &ProjectDescriptor) -> Result<FileEntry, GenerateError> {
    let path = &descriptor.artifact.path;
    let name = artifact_file_name(
        &descriptor.module,
        &descriptor.version,
        descriptor.artifact.classifier.as_deref(),
        path,
    )?;

    let checksums = Checksums::compute(path)?;
    let size = fs::metadata(path)
        .map_err(|source| GenerateError::Artifact {
            path: path.clone(),
            source,
        })?
        .len();
    debug!("Artifact {name}: {size} bytes");

    Ok(FileEntry {
        url: name.clone(),
        name,
        size,
        sha512: checksums.sha512.as_hex_string(),
        sha256: checksums.sha256.as_hex_string(),
        sha1: checksums.sha1.as_hex_string(),
        md5: checksums.md5.as_hex_string(),
    })
}

fn variant_entry(
    variant: Variant,
    descriptor: &ProjectDescriptor,
    file: &FileEntry,
) -> VariantEntry {
    VariantEntry {
        name: variant.name().to_string(),
        attributes: variant.attributes(),
        dependencies: variant_dependencies(variant, descriptor),
        files: vec![file.clone()],
        capabilities: capabilities(descriptor),
    }
}

fn variant_dependencies(
    variant: Variant,
    descriptor: &ProjectDescriptor,
) -> Option<Vec<DependencyEntry>> {
    if descriptor.dependencies.is_empty() && descriptor.platform_dependencies.is_empty() {
        return None;
    }

    let regular = descriptor
        .dependencies
        .iter()
        .filter(|dep| variant.includes(dep, descriptor))
        .map(|dep| dependency_entry(dep, false));
    let platform = descriptor
        .platform_dependencies
        .iter()
        .filter(|dep| variant.includes_platform(dep))
        .map(|dep| dependency_entry(dep, true));

    Some(regular.chain(platform).collect())
}

fn dependency_entry(dependency: &Dependency, platform: bool) -> DependencyEntry {
    let attributes = if platform {
        Attributes::from([(
            attributes::CATEGORY.to_string(),
            attributes::CATEGORY_PLATFORM.to_string(),
        )])
    } else {
        Attributes::new()
    };

    let third_party_compatibility = dependency
        .selects_artifact()
        .then(|| ThirdPartyCompatibility {
            artifact_selector: ArtifactSelector {
                name: dependency.module.clone(),
                kind: dependency.artifact_type().to_string(),
                classifier: dependency.classifier().map(ToString::to_string),
            },
        });

    DependencyEntry {
        group: dependency.group.clone(),
        module: dependency.module.clone(),
        version: dependency.version.as_ref().map(|version| VersionConstraint {
            requires: version.clone(),
        }),
        excludes: dependency.exclusions.clone(),
        attributes,
        endorse_strict_versions: platform,
        third_party_compatibility,
    }
}

fn capabilities(descriptor: &ProjectDescriptor) -> Option<Vec<CapabilityEntry>> {
    if descriptor.capabilities.is_empty() {
        return None;
    }

    let own = CapabilityEntry {
        group: descriptor.group.clone(),
        name: descriptor.module.clone(),
        version: descriptor.version.clone(),
    };
    let declared = descriptor
        .capabilities
        .iter()
        .map(|capability| CapabilityEntry {
            group: capability.group.clone(),
            name: capability.name.clone(),
            version: capability.version_or(&descriptor.version).to_string(),
        });

    Some(std::iter::once(own).chain(declared).collect())
}
