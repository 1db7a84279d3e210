//! Serde model of the module metadata document.
//!
//! Field declaration order is emission order, and consumers diff these
//! files, so do not reorder fields. Attribute maps are `BTreeMap`s to keep
//! their keys sorted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::Coordinate;

/// Version of the document format written by this crate.
pub const FORMAT_VERSION: &str = "1.1";

/// Attribute keys and values used in the document.
pub mod attributes {
    /// Component status (`integration` or `release`).
    pub const STATUS: &str = "org.example.status";
    /// Kind of component a variant or dependency refers to.
    pub const CATEGORY: &str = "org.example.category";
    /// Whether dependencies are bundled into the artifact.
    pub const DEPENDENCY_BUNDLING: &str = "org.example.dependency.bundling";
    /// Packaging of the variant's files.
    pub const LIBRARY_ELEMENTS: &str = "org.example.libraryelements";
    /// Consumption context of a variant.
    pub const USAGE: &str = "org.example.usage";

    /// Status of snapshot builds.
    pub const STATUS_INTEGRATION: &str = "integration";
    /// Status of every other build.
    pub const STATUS_RELEASE: &str = "release";
    /// Category of a regular library variant.
    pub const CATEGORY_LIBRARY: &str = "library";
    /// Category attached to platform dependencies.
    pub const CATEGORY_PLATFORM: &str = "platform";
    /// Dependencies are resolved separately, not bundled.
    pub const BUNDLING_EXTERNAL: &str = "external";
    /// Variant files are plain archives.
    pub const LIBRARY_ELEMENTS_JAR: &str = "jar";
}

/// Sorted attribute map.
pub type Attributes = BTreeMap<String, String>;

/// The whole document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDocument {
    /// Always [`FORMAT_VERSION`].
    pub format_version: String,
    /// Identity of the published module.
    pub component: Component,
    /// Tool name mapped to its version.
    pub created_by: BTreeMap<String, ToolVersion>,
    /// `apiElements` followed by `runtimeElements`.
    pub variants: Vec<VariantEntry>,
}

/// Component identity block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    /// Module group.
    pub group: String,
    /// Module name.
    pub module: String,
    /// Module version.
    pub version: String,
    /// Component attributes.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: Attributes,
}

/// Version of the tool that wrote the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolVersion {
    /// Opaque version string.
    pub version: String,
}

/// One consumable variant of the module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantEntry {
    /// Variant name.
    pub name: String,
    /// Variant attributes.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: Attributes,
    /// Dependencies exposed by this variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<DependencyEntry>>,
    /// Files making up this variant.
    pub files: Vec<FileEntry>,
    /// Capabilities provided by this variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Vec<CapabilityEntry>>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

/// A dependency as seen by consumers of one variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyEntry {
    /// Dependency group.
    pub group: String,
    /// Dependency module.
    pub module: String,
    /// Version constraint, absent when no version was declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<VersionConstraint>,
    /// Transitive exclusions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excludes: Vec<Coordinate>,
    /// Dependency attributes (platform dependencies only).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: Attributes,
    /// Set for platform dependencies.
    #[serde(default, skip_serializing_if = "is_false")]
    pub endorse_strict_versions: bool,
    /// Artifact selection for non-default types and classifiers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub third_party_compatibility: Option<ThirdPartyCompatibility>,
}

/// `{ "requires": <version> }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionConstraint {
    /// The required version.
    pub requires: String,
}

/// Wrapper around an [`ArtifactSelector`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThirdPartyCompatibility {
    /// The selected artifact.
    pub artifact_selector: ArtifactSelector,
}

/// Names a specific artifact of a dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSelector {
    /// Logical artifact name (the dependency's module).
    pub name: String,
    /// Artifact type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Artifact classifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
}

/// A published file and its fingerprints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Rendered file name.
    pub name: String,
    /// Location relative to this document (same as `name`).
    pub url: String,
    /// Length in bytes.
    pub size: u64,
    /// SHA-512 digest.
    pub sha512: String,
    /// SHA-256 digest.
    pub sha256: String,
    /// SHA-1 digest.
    pub sha1: String,
    /// MD5 digest.
    pub md5: String,
}

/// A capability in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityEntry {
    /// Capability group.
    pub group: String,
    /// Capability name.
    pub name: String,
    /// Capability version.
    pub version: String,
}
