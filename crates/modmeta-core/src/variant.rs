//! The two fixed consumption variants.

use modmeta_schema::document::{Attributes, attributes};
use modmeta_schema::{Dependency, ProjectDescriptor, Scope};
use tracing::debug;

/// A consumption context of the module.
///
/// The set is closed: every document carries exactly these two, in
/// [`Variant::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// What consumers compile against.
    ApiElements,
    /// What consumers need on the runtime classpath.
    RuntimeElements,
}

impl Variant {
    /// Emission order.
    pub const ALL: [Self; 2] = [Self::ApiElements, Self::RuntimeElements];

    /// Name written to the document.
    pub fn name(self) -> &'static str {
        match self {
            Self::ApiElements => "apiElements",
            Self::RuntimeElements => "runtimeElements",
        }
    }

    /// Value of the usage attribute.
    pub fn usage(self) -> &'static str {
        match self {
            Self::ApiElements => "library-api",
            Self::RuntimeElements => "library-runtime",
        }
    }

    /// Dependency scopes exposed by this variant.
    pub fn scopes(self) -> &'static [Scope] {
        match self {
            Self::ApiElements => &[Scope::Compile],
            Self::RuntimeElements => &[Scope::Compile, Scope::Runtime],
        }
    }

    /// True if dependencies with `scope` are exposed by this variant.
    pub fn accepts(self, scope: Scope) -> bool {
        self.scopes().contains(&scope)
    }

    /// Fixed attribute set of the variant.
    pub fn attributes(self) -> Attributes {
        [
            (attributes::CATEGORY, attributes::CATEGORY_LIBRARY),
            (attributes::DEPENDENCY_BUNDLING, attributes::BUNDLING_EXTERNAL),
            (attributes::LIBRARY_ELEMENTS, attributes::LIBRARY_ELEMENTS_JAR),
            (attributes::USAGE, self.usage()),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
    }

    /// Whether a regular dependency of `descriptor` is published in this
    /// variant.
    ///
    /// Unscoped regular dependencies count as `compile`.
    pub fn includes(self, dependency: &Dependency, descriptor: &ProjectDescriptor) -> bool {
        if dependency.optional {
            debug!(
                "{}: skipping optional {}:{}",
                self.name(),
                dependency.group,
                dependency.module
            );
            return false;
        }
        let scope = dependency.scope.unwrap_or(Scope::Compile);
        if !self.accepts(scope) {
            return false;
        }
        if descriptor.is_removed(dependency) {
            debug!(
                "{}: skipping removed {}:{}",
                self.name(),
                dependency.group,
                dependency.module
            );
            return false;
        }
        true
    }

    /// Whether a platform dependency is published in this variant.
    ///
    /// Only the scope is checked; an unscoped platform dependency goes
    /// everywhere.
    pub fn includes_platform(self, dependency: &Dependency) -> bool {
        dependency.scope.is_none_or(|scope| self.accepts(scope))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modmeta_schema::Coordinate;

    fn descriptor() -> ProjectDescriptor {
        ProjectDescriptor::new("g", "m", "1.0", "m-1.0.jar")
    }

    #[test]
    fn runtime_scope_only_in_runtime_variant() {
        let dep = Dependency::new("d", "rt").with_scope(Scope::Runtime);
        assert!(!Variant::ApiElements.includes(&dep, &descriptor()));
        assert!(Variant::RuntimeElements.includes(&dep, &descriptor()));
    }

    #[test]
    fn compile_and_unscoped_in_both() {
        let scoped = Dependency::new("d", "c").with_scope(Scope::Compile);
        let unscoped = Dependency::new("d", "u");
        for variant in Variant::ALL {
            assert!(variant.includes(&scoped, &descriptor()));
            assert!(variant.includes(&unscoped, &descriptor()));
        }
    }

    #[test]
    fn test_provided_and_optional_never_published() {
        let deps = [
            Dependency::new("d", "t").with_scope(Scope::Test),
            Dependency::new("d", "p").with_scope(Scope::Provided),
            Dependency::new("d", "o").with_scope(Scope::Compile).optional(),
        ];
        for variant in Variant::ALL {
            for dep in &deps {
                assert!(!variant.includes(dep, &descriptor()), "{dep:?}");
            }
        }
    }

    #[test]
    fn removed_dependencies_are_dropped() {
        let mut descriptor = descriptor();
        descriptor
            .removed_dependencies
            .push(Coordinate::new("d", "shaded"));
        let dep = Dependency::new("d", "shaded").with_version("2.0");
        for variant in Variant::ALL {
            assert!(!variant.includes(&dep, &descriptor));
        }
    }

    #[test]
    fn platform_scope_filtering() {
        let unscoped = Dependency::new("p", "bom");
        let runtime = Dependency::new("p", "rt-bom").with_scope(Scope::Runtime);
        assert!(Variant::ApiElements.includes_platform(&unscoped));
        assert!(Variant::RuntimeElements.includes_platform(&unscoped));
        assert!(!Variant::ApiElements.includes_platform(&runtime));
        assert!(Variant::RuntimeElements.includes_platform(&runtime));
    }

    #[test]
    fn attributes_are_sorted() {
        let keys: Vec<_> = Variant::ApiElements.attributes().into_keys().collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(
            Variant::RuntimeElements.attributes()[attributes::USAGE],
            "library-runtime"
        );
    }
}
