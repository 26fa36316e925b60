//! Fully qualified resource names and their mapping to resource ids.

use std::fmt;

use crate::resources::kind::ResourceKind;

/// A fully qualified resource name: package, kind and entry.
///
/// Maps 1:1 to a [`crate::ResourceId`] inside the identifier registry. The
/// mapping is established at registration time and never mutated afterwards.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ResourceName {
    /// The package the entry belongs to, e.g. `"android"` or an app package
    pub package: String,
    /// The resource kind, e.g. [`ResourceKind::String`]
    pub kind: ResourceKind,
    /// The entry name within the package and kind, e.g. `"app_name"`
    pub entry: String,
}

impl ResourceName {
    /// Creates a new qualified name.
    pub fn new(package: impl Into<String>, kind: ResourceKind, entry: impl Into<String>) -> Self {
        ResourceName {
            package: package.into(),
            kind,
            entry: entry.into(),
        }
    }

    /// Parses a `@[package:]type/name` reference as it appears in document
    /// attribute values and array items.
    ///
    /// A reference without an explicit package resolves against
    /// `default_package`. Returns `None` for strings that are not references
    /// or name an unknown type.
    #[must_use]
    pub fn parse_reference(raw: &str, default_package: &str) -> Option<ResourceName> {
        let body = raw.strip_prefix('@')?;
        let (scope, rest) = match body.split_once(':') {
            Some((package, rest)) => (package, rest),
            None => (default_package, body),
        };
        let (type_name, entry) = rest.split_once('/')?;
        let kind = ResourceKind::from_type_name(type_name)?;
        if scope.is_empty() || entry.is_empty() {
            return None;
        }
        Some(ResourceName::new(scope, kind, entry))
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.package, self.kind, self.entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_qualified() {
        let name = ResourceName::new("app", ResourceKind::String, "app_name");
        assert_eq!(format!("{}", name), "app:string/app_name");
    }

    #[test]
    fn parses_unqualified_reference() {
        let name = ResourceName::parse_reference("@string/hello", "app").unwrap();
        assert_eq!(name, ResourceName::new("app", ResourceKind::String, "hello"));
    }

    #[test]
    fn parses_package_qualified_reference() {
        let name = ResourceName::parse_reference("@android:color/white", "app").unwrap();
        assert_eq!(
            name,
            ResourceName::new("android", ResourceKind::Color, "white")
        );
    }

    #[test]
    fn rejects_non_references() {
        assert!(ResourceName::parse_reference("plain text", "app").is_none());
        assert!(ResourceName::parse_reference("@string", "app").is_none());
        assert!(ResourceName::parse_reference("@nosuchtype/x", "app").is_none());
        assert!(ResourceName::parse_reference("@string/", "app").is_none());
    }
}
