//! Bidirectional mapping between resource names and ids.
//!
//! The registry is the single source of truth for which symbolic names exist
//! and which 32-bit id each one owns. It is populated once per store, from
//! generated-constants input, before any document is parsed; afterwards it
//! is read-only for the life of the process.
//!
//! Conflicting registrations are a configuration error: if two names claim
//! one id, or one name claims two ids, the generated input is corrupt and no
//! resolution can be trusted. Registration fails loudly at that point rather
//! than at lookup time.
//!
//! # Example
//!
//! ```rust
//! use rescope::{ResourceKind, ResourceName, ResourceRegistry};
//!
//! let registry = ResourceRegistry::new();
//! registry.register_text(
//!     "app",
//!     "int string app_name 0x7f040000\n\
//!      int color highlight 0x7f050000",
//! )?;
//!
//! let name = ResourceName::new("app", ResourceKind::String, "app_name");
//! let id = registry.resolve_id(&name).unwrap();
//! assert_eq!(id.value(), 0x7f04_0000);
//! assert_eq!(registry.resolve_name(id), Some(name));
//! # Ok::<(), rescope::Error>(())
//! ```

use dashmap::DashMap;

use crate::resources::id::ResourceId;
use crate::resources::kind::ResourceKind;
use crate::resources::name::ResourceName;
use crate::{Error, Result};

/// Bidirectional name ⇄ id registry.
///
/// Lookups in both directions are pure and return explicit misses. The maps
/// are concurrent so the parallel loaders can resolve names without
/// coordination, but all registration happens before any loader runs.
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    by_name: DashMap<ResourceName, ResourceId>,
    by_id: DashMap<ResourceId, ResourceName>,
}

impl ResourceRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> ResourceRegistry {
        ResourceRegistry::default()
    }

    /// Registers one (name, id) pair.
    ///
    /// Re-registering an identical pair is a no-op, so the same constants
    /// input can be ingested more than once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateIdRegistration`] if the id is already owned
    /// by a different name or the name already owns a different id.
    pub fn register(&self, name: ResourceName, id: ResourceId) -> Result<()> {
        if let Some(existing) = self.by_id.get(&id) {
            if *existing != name {
                return Err(Error::DuplicateIdRegistration {
                    id,
                    existing: existing.to_string(),
                    incoming: name.to_string(),
                });
            }
            return Ok(());
        }
        if let Some(existing_id) = self.by_name.get(&name) {
            if *existing_id != id {
                return Err(Error::DuplicateIdRegistration {
                    id,
                    existing: format!("{} as {}", name, *existing_id),
                    incoming: name.to_string(),
                });
            }
            return Ok(());
        }

        self.by_id.insert(id, name.clone());
        self.by_name.insert(name, id);
        Ok(())
    }

    /// Registers a closed set of constants for one package.
    ///
    /// # Arguments
    ///
    /// * `package` - The package every entry belongs to
    /// * `constants` - (kind, entry name, raw id) triples
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateIdRegistration`] on any conflicting pair;
    /// entries before the conflict remain registered.
    pub fn register_package(
        &self,
        package: &str,
        constants: &[(ResourceKind, &str, u32)],
    ) -> Result<()> {
        for (kind, entry, id) in constants {
            self.register(
                ResourceName::new(package, *kind, *entry),
                ResourceId::new(*id),
            )?;
        }
        Ok(())
    }

    /// Registers constants from generated text input, one entry per line in
    /// the form `int <type> <name> <id>` with a hexadecimal or decimal id.
    ///
    /// Blank lines are ignored. `int[]` declarations and unknown type names
    /// (such as `styleable`) are skipped: they are generated alongside the
    /// kinds this crate loads but carry no loadable value.
    ///
    /// # Errors
    ///
    /// Returns a generic error for a structurally invalid line and
    /// [`Error::DuplicateIdRegistration`] for conflicting pairs.
    pub fn register_text(&self, package: &str, text: &str) -> Result<()> {
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let mut fields = line.split_whitespace();
            let Some(keyword) = fields.next() else {
                continue;
            };
            // Array declarations ("int[] styleable ...") span the id block
            // of a styleable; nothing loadable is behind them.
            if keyword == "int[]" {
                continue;
            }
            if keyword != "int" {
                return Err(Error::Error(format!("invalid constants line: '{line}'")));
            }

            let (Some(type_name), Some(entry), Some(value), None) =
                (fields.next(), fields.next(), fields.next(), fields.next())
            else {
                return Err(Error::Error(format!("invalid constants line: '{line}'")));
            };

            let Some(kind) = ResourceKind::from_type_name(type_name) else {
                continue;
            };

            let id = match value.strip_prefix("0x") {
                Some(hex) => u32::from_str_radix(hex, 16),
                None => value.parse(),
            }
            .map_err(|_| Error::Error(format!("invalid constants line: '{line}'")))?;

            self.register(ResourceName::new(package, kind, entry), ResourceId::new(id))?;
        }
        Ok(())
    }

    /// Resolves a qualified name to its id.
    #[must_use]
    pub fn resolve_id(&self, name: &ResourceName) -> Option<ResourceId> {
        self.by_name.get(name).map(|entry| *entry.value())
    }

    /// Resolves a (package, kind, entry) triple to its id without building a
    /// [`ResourceName`] at the call site.
    #[must_use]
    pub fn resolve_entry(
        &self,
        package: &str,
        kind: ResourceKind,
        entry: &str,
    ) -> Option<ResourceId> {
        self.resolve_id(&ResourceName::new(package, kind, entry))
    }

    /// Resolves an id back to its qualified name.
    #[must_use]
    pub fn resolve_name(&self, id: ResourceId) -> Option<ResourceName> {
        self.by_id.get(&id).map(|entry| entry.value().clone())
    }

    /// Returns the number of registered pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Returns true if nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bijection_over_registered_set() {
        let registry = ResourceRegistry::new();
        let pairs = [
            (ResourceKind::String, "app_name", 0x7f04_0000_u32),
            (ResourceKind::String, "title", 0x7f04_0001),
            (ResourceKind::Color, "highlight", 0x7f05_0000),
        ];
        registry.register_package("app", &pairs).unwrap();

        for (kind, entry, raw) in pairs {
            let name = ResourceName::new("app", kind, entry);
            let id = registry.resolve_id(&name).unwrap();
            assert_eq!(id.value(), raw);
            assert_eq!(registry.resolve_name(id), Some(name));
        }
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn misses_are_explicit() {
        let registry = ResourceRegistry::new();
        assert!(registry
            .resolve_entry("app", ResourceKind::String, "ghost")
            .is_none());
        assert!(registry.resolve_name(ResourceId(0x7f04_0000)).is_none());
    }

    #[test]
    fn duplicate_id_fails_loudly() {
        let registry = ResourceRegistry::new();
        registry
            .register(
                ResourceName::new("app", ResourceKind::String, "one"),
                ResourceId(0x7f04_0000),
            )
            .unwrap();

        let err = registry
            .register(
                ResourceName::new("app", ResourceKind::String, "two"),
                ResourceId(0x7f04_0000),
            )
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateIdRegistration { .. }));
    }

    #[test]
    fn duplicate_name_fails_loudly() {
        let registry = ResourceRegistry::new();
        let name = ResourceName::new("app", ResourceKind::String, "one");
        registry
            .register(name.clone(), ResourceId(0x7f04_0000))
            .unwrap();

        let err = registry
            .register(name, ResourceId(0x7f04_0001))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateIdRegistration { .. }));
    }

    #[test]
    fn identical_reregistration_is_noop() {
        let registry = ResourceRegistry::new();
        let name = ResourceName::new("app", ResourceKind::String, "one");
        registry
            .register(name.clone(), ResourceId(0x7f04_0000))
            .unwrap();
        registry.register(name, ResourceId(0x7f04_0000)).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn parses_generated_text() {
        let registry = ResourceRegistry::new();
        registry
            .register_text(
                "app",
                "int string app_name 0x7f040000\n\
                 \n\
                 int array planets 0x7f050000\n\
                 int styleable ignored_attr 0x7f060000\n\
                 int[] styleable ignored_block { 0x7f060000 }\n\
                 int layout main 0x7f070000",
            )
            .unwrap();

        assert_eq!(registry.len(), 3);
        assert!(registry
            .resolve_entry("app", ResourceKind::StringArray, "planets")
            .is_some());
        assert!(registry
            .resolve_entry("app", ResourceKind::Layout, "main")
            .is_some());
    }

    #[test]
    fn rejects_malformed_text() {
        let registry = ResourceRegistry::new();
        assert!(registry.register_text("app", "int string app_name").is_err());
        assert!(registry
            .register_text("app", "int string app_name 0xZZ")
            .is_err());
        assert!(registry
            .register_text("app", "float string app_name 0x7f040000")
            .is_err());
    }
}
