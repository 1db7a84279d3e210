//! Input model: the project descriptor and its dependency records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Artifact type assumed when a dependency does not declare one.
pub const DEFAULT_ARTIFACT_TYPE: &str = "jar";

/// Packaging assumed when a descriptor does not declare one.
pub const DEFAULT_PACKAGING: &str = "jar";

/// Which consumption contexts need a dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Scope {
    /// Needed to compile against the module and at runtime.
    ///
    /// `compile-only` and `compile+runtime` parse to this scope.
    Compile,
    /// Supplied by the container at runtime; never published.
    Provided,
    /// Needed at runtime only.
    Runtime,
    /// Needed by the module's own tests only.
    Test,
    /// Like `provided`, resolved from a local path.
    System,
    /// Import of a dependency-management section.
    Import,
}

impl Scope {
    /// The scope's name as written in build files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compile => "compile",
            Self::Provided => "provided",
            Self::Runtime => "runtime",
            Self::Test => "test",
            Self::System => "system",
            Self::Import => "import",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognised scope name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown dependency scope: {0}")]
pub struct UnknownScope(pub String);

impl FromStr for Scope {
    type Err = UnknownScope;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compile" | "compile-only" | "compile+runtime" => Ok(Self::Compile),
            "provided" => Ok(Self::Provided),
            "runtime" => Ok(Self::Runtime),
            "test" => Ok(Self::Test),
            "system" => Ok(Self::System),
            "import" => Ok(Self::Import),
            other => Err(UnknownScope(other.to_string())),
        }
    }
}

impl TryFrom<String> for Scope {
    type Error = UnknownScope;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A `group:module` pair.
///
/// Used for transitive exclusions and for the removed-dependency blocklist,
/// both of which match on coordinates only and ignore versions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    /// Group (organisation) the module belongs to.
    pub group: String,
    /// Module name within the group.
    pub module: String,
}

impl Coordinate {
    /// Create a coordinate from its two parts.
    pub fn new(group: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            module: module.into(),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.module)
    }
}

/// A transitive dependency to suppress.
pub type Exclusion = Coordinate;

/// A declared dependency of the project, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Group of the dependency.
    pub group: String,
    /// Module name of the dependency.
    pub module: String,
    /// Required version. `None` leaves the version to transitive resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Declared scope, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
    /// Optional dependencies are ignored by every consumer.
    #[serde(default)]
    pub optional: bool,
    /// Artifact type (`jar` when absent).
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Artifact classifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
    /// Transitive dependencies to suppress.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclusions: Vec<Exclusion>,
}

impl Dependency {
    /// A versionless, unscoped dependency on `group:module`.
    pub fn new(group: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            module: module.into(),
            version: None,
            scope: None,
            optional: false,
            kind: None,
            classifier: None,
            exclusions: Vec::new(),
        }
    }

    /// Set the required version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the scope.
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Mark the dependency optional.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Set the artifact type.
    pub fn with_type(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Set the artifact classifier.
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    /// Add a transitive exclusion.
    pub fn with_exclusion(mut self, group: impl Into<String>, module: impl Into<String>) -> Self {
        self.exclusions.push(Coordinate::new(group, module));
        self
    }

    /// True if this dependency has the same group and module as `coordinate`.
    pub fn matches(&self, coordinate: &Coordinate) -> bool {
        self.group == coordinate.group && self.module == coordinate.module
    }

    /// The artifact type, falling back to [`DEFAULT_ARTIFACT_TYPE`].
    pub fn artifact_type(&self) -> &str {
        match self.kind.as_deref() {
            Some(kind) if !kind.is_empty() => kind,
            _ => DEFAULT_ARTIFACT_TYPE,
        }
    }

    /// The classifier, if one is set and non-empty.
    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref().filter(|c| !c.is_empty())
    }

    /// True if the dependency points at something other than the plain
    /// default archive of its module.
    pub fn selects_artifact(&self) -> bool {
        self.classifier().is_some() || self.artifact_type() != DEFAULT_ARTIFACT_TYPE
    }
}

/// A feature identity provided by the module in addition to its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    /// Capability group.
    pub group: String,
    /// Capability name.
    pub name: String,
    /// Capability version. Absent or empty means the module's own version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Capability {
    /// A capability that inherits the module version.
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: None,
        }
    }

    /// Set an explicit version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// The capability version, or `fallback` when none was declared.
    pub fn version_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.version.as_deref() {
            Some(version) if !version.is_empty() => version,
            _ => fallback,
        }
    }
}

/// The file the build produced for this module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProducedArtifact {
    /// Location of the file on disk.
    #[serde(default)]
    pub path: PathBuf,
    /// Classifier of the produced artifact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
}

impl ProducedArtifact {
    /// An unclassified artifact at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            classifier: None,
        }
    }
}

fn default_packaging() -> String {
    DEFAULT_PACKAGING.to_string()
}

/// Everything the host build knows about the module being published.
///
/// Required fields default to empty so that a missing value is reported by
/// the generator as a missing field rather than as a parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDescriptor {
    /// Module group.
    #[serde(default)]
    pub group: String,
    /// Module name.
    #[serde(default)]
    pub module: String,
    /// Module version.
    #[serde(default)]
    pub version: String,
    /// Packaging kind (e.g. `jar`, `pom`).
    #[serde(default = "default_packaging")]
    pub packaging: String,
    /// Declared dependencies in declaration order.
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    /// The produced artifact.
    #[serde(default)]
    pub artifact: ProducedArtifact,
    /// Dependencies merged in as platform (BOM) constraints.
    #[serde(default)]
    pub platform_dependencies: Vec<Dependency>,
    /// Capabilities provided in addition to the module's own.
    #[serde(default)]
    pub capabilities: Vec<Capability>,
    /// Dependencies dropped from the published metadata, e.g. because a
    /// shading step inlined them.
    #[serde(default)]
    pub removed_dependencies: Vec<Coordinate>,
}

impl ProjectDescriptor {
    /// A descriptor with identity and artifact set and everything else empty.
    pub fn new(
        group: impl Into<String>,
        module: impl Into<String>,
        version: impl Into<String>,
        artifact: impl Into<PathBuf>,
    ) -> Self {
        Self {
            group: group.into(),
            module: module.into(),
            version: version.into(),
            packaging: default_packaging(),
            dependencies: Vec::new(),
            artifact: ProducedArtifact::new(artifact),
            platform_dependencies: Vec::new(),
            capabilities: Vec::new(),
            removed_dependencies: Vec::new(),
        }
    }

    /// True if the dependency's group and module are on the blocklist.
    pub fn is_removed(&self, dependency: &Dependency) -> bool {
        self.removed_dependencies
            .iter()
            .any(|removed| dependency.matches(removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_aliases_parse_to_compile() {
        assert_eq!("compile".parse::<Scope>(), Ok(Scope::Compile));
        assert_eq!("compile-only".parse::<Scope>(), Ok(Scope::Compile));
        assert_eq!("compile+runtime".parse::<Scope>(), Ok(Scope::Compile));
        assert_eq!("runtime".parse::<Scope>(), Ok(Scope::Runtime));
        assert!("bogus".parse::<Scope>().is_err());
    }

    #[test]
    fn scope_deserializes_through_parser() {
        let scope: Scope = serde_json::from_str(r#""compile+runtime""#).unwrap();
        assert_eq!(scope, Scope::Compile);
        assert_eq!(serde_json::to_string(&scope).unwrap(), r#""compile""#);

        let err = serde_json::from_str::<Scope>(r#""bogus""#).unwrap_err();
        assert!(err.to_string().contains("Unknown dependency scope: bogus"));
    }

    #[test]
    fn default_artifact_is_plain_jar() {
        let dep = Dependency::new("g", "m");
        assert_eq!(dep.artifact_type(), "jar");
        assert!(!dep.selects_artifact());

        let empty = Dependency::new("g", "m").with_type("").with_classifier("");
        assert!(!empty.selects_artifact());
    }

    #[test]
    fn classifier_or_type_selects_artifact() {
        assert!(Dependency::new("g", "m").with_classifier("tests").selects_artifact());
        assert!(Dependency::new("g", "m").with_type("zip").selects_artifact());
    }

    #[test]
    fn blocklist_ignores_version() {
        let mut descriptor = ProjectDescriptor::new("g", "m", "1.0", "m.jar");
        descriptor
            .removed_dependencies
            .push(Coordinate::new("org.shaded", "lib"));

        let dep = Dependency::new("org.shaded", "lib").with_version("9.9");
        assert!(descriptor.is_removed(&dep));
        assert!(!descriptor.is_removed(&Dependency::new("org.shaded", "other")));
    }

    #[test]
    fn capability_version_falls_back() {
        assert_eq!(Capability::new("g", "c").version_or("1.0"), "1.0");
        assert_eq!(
            Capability::new("g", "c").with_version("").version_or("1.0"),
            "1.0"
        );
        assert_eq!(
            Capability::new("g", "c").with_version("2.0").version_or("1.0"),
            "2.0"
        );
    }
}
