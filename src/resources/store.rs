//! The merged, queryable resource store.
//!
//! [`ResourceStore`] owns the identifier registry, one typed table per
//! resource kind, and the pass list describing which roots to load in which
//! order. It is built once via [`ResourceStoreBuilder`], populated exactly
//! once by the loader pipeline, and read-mostly for the rest of its life.
//!
//! # Lifecycle
//!
//! 1. Register constants and roots on the builder
//! 2. `build()` the store (no I/O happens yet)
//! 3. Either call [`ResourceStore::initialize`] explicitly or let the first
//!    typed lookup trigger it; both run the full load exactly once
//! 4. Query by id; misses are explicit `Ok(None)` values
//!
//! # Ordering
//!
//! The system pass always completes in full before any application pass
//! begins; application roots load in the order they were added. Within a
//! colliding id, the last written value wins, so application resources
//! override system resources and later roots override earlier ones. There is
//! no qualifier best-match scoring.
//!
//! # Example
//!
//! ```rust
//! use rescope::{Memory, ResourceKind, ResourceName, ResourceStoreBuilder};
//!
//! let fs = Memory::new();
//! fs.add_file(
//!     "values/strings.xml",
//!     r#"<resources><string name="app_name">Demo</string></resources>"#,
//! )?;
//!
//! let store = ResourceStoreBuilder::new()
//!     .register_text("app", "int string app_name 0x7f040000")?
//!     .app_root(fs.root(), "app")
//!     .build();
//!
//! let id = store
//!     .resolve_id(&ResourceName::new("app", ResourceKind::String, "app_name"))
//!     .unwrap();
//! assert_eq!(store.string(id)?.as_deref(), Some("Demo"));
//! # Ok::<(), rescope::Error>(())
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::fs::EntryRc;
use crate::resources::diagnostics::Diagnostics;
use crate::resources::id::ResourceId;
use crate::resources::kind::ResourceKind;
use crate::resources::loader::{execute_loaders_in_parallel, LoadContext, LoadPass};
use crate::resources::name::ResourceName;
use crate::resources::registry::ResourceRegistry;
use crate::resources::tables::{
    AttrRc, Dimension, ResourceNodeRc, StringArrayRc, StringRc, Tables,
};
use crate::{Error, Result};

/// Builder for a [`ResourceStore`].
///
/// Collects the identifier constants and the roots to load. Nothing is read
/// from the filesystem until the store initializes.
#[derive(Default)]
pub struct ResourceStoreBuilder {
    registry: ResourceRegistry,
    system_root: Option<EntryRc>,
    system_package: Option<String>,
    app_roots: Vec<(EntryRc, String)>,
}

impl ResourceStoreBuilder {
    /// Creates a new empty builder.
    #[must_use]
    pub fn new() -> ResourceStoreBuilder {
        ResourceStoreBuilder::default()
    }

    /// Registers a closed set of constants for one package.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateIdRegistration`] on conflicting pairs.
    pub fn register_package(
        self,
        package: &str,
        constants: &[(ResourceKind, &str, u32)],
    ) -> Result<ResourceStoreBuilder> {
        self.registry.register_package(package, constants)?;
        Ok(self)
    }

    /// Registers constants from generated text input, one `int <type> <name>
    /// <id>` entry per line.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed lines or conflicting pairs.
    pub fn register_text(self, package: &str, text: &str) -> Result<ResourceStoreBuilder> {
        self.registry.register_text(package, text)?;
        Ok(self)
    }

    /// Sets the system resource root, loaded before every application root.
    ///
    /// Names in the system root resolve against the `android` package unless
    /// overridden with [`ResourceStoreBuilder::system_package`]. Not setting
    /// a system root means "no system resources available", which is not an
    /// error.
    #[must_use]
    pub fn system_root(mut self, root: EntryRc) -> ResourceStoreBuilder {
        self.system_root = Some(root);
        self
    }

    /// Overrides the package name system resources resolve against.
    #[must_use]
    pub fn system_package(mut self, package: impl Into<String>) -> ResourceStoreBuilder {
        self.system_package = Some(package.into());
        self
    }

    /// Adds an application resource root; roots load in the order added.
    #[must_use]
    pub fn app_root(mut self, root: EntryRc, package: impl Into<String>) -> ResourceStoreBuilder {
        self.app_roots.push((root, package.into()));
        self
    }

    /// Builds the store. No I/O happens here.
    #[must_use]
    pub fn build(self) -> ResourceStore {
        let mut passes = Vec::new();
        if let Some(root) = self.system_root {
            passes.push(LoadPass {
                root,
                package: self
                    .system_package
                    .unwrap_or_else(|| "android".to_string()),
            });
        }
        for (root, package) in self.app_roots {
            passes.push(LoadPass { root, package });
        }

        ResourceStore {
            registry: self.registry,
            tables: Tables::new(),
            passes,
            diagnostics: Diagnostics::new(),
            init_lock: Mutex::new(()),
            ready: AtomicBool::new(false),
        }
    }
}

/// The merged resource store: every typed table plus the identifier
/// registry, populated exactly once.
pub struct ResourceStore {
    registry: ResourceRegistry,
    tables: Tables,
    passes: Vec<LoadPass>,
    diagnostics: Diagnostics,
    init_lock: Mutex<()>,
    ready: AtomicBool,
}

impl ResourceStore {
    /// Runs the load passes exactly once.
    ///
    /// The first caller performs the full load while holding the guard, so
    /// concurrent callers racing into a lazily initialized store observe
    /// either nothing or the completely populated tables, never a torn
    /// state. Calling this again after success is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error on loader-infrastructure failures. Skipped files and
    /// entries are not errors; they are collected in
    /// [`ResourceStore::diagnostics`].
    pub fn initialize(&self) -> Result<()> {
        if self.ready.load(Ordering::Acquire) {
            return Ok(());
        }

        let _guard = self.init_lock.lock().map_err(|_| Error::LockError)?;
        if self.ready.load(Ordering::Acquire) {
            return Ok(());
        }

        let context = LoadContext::new(
            &self.passes,
            &self.registry,
            &self.tables,
            &self.diagnostics,
        );
        execute_loaders_in_parallel(&context)?;

        self.ready.store(true, Ordering::Release);
        Ok(())
    }

    /// Looks up a string resource.
    ///
    /// # Errors
    ///
    /// Returns an error only if the implicit initialization fails; a missing
    /// entry is `Ok(None)`.
    pub fn string(&self, id: ResourceId) -> Result<Option<StringRc>> {
        self.initialize()?;
        Ok(self.tables.strings.get(&id).map(|e| e.value().clone()))
    }

    /// Looks up a string-array resource.
    ///
    /// # Errors
    ///
    /// Returns an error only if the implicit initialization fails.
    pub fn string_array(&self, id: ResourceId) -> Result<Option<StringArrayRc>> {
        self.initialize()?;
        Ok(self.tables.string_arrays.get(&id).map(|e| e.value().clone()))
    }

    /// Looks up a color resource as a packed ARGB value.
    ///
    /// # Errors
    ///
    /// Returns an error only if the implicit initialization fails.
    pub fn color(&self, id: ResourceId) -> Result<Option<u32>> {
        self.initialize()?;
        Ok(self.tables.colors.get(&id).map(|e| *e.value()))
    }

    /// Looks up a dimension resource.
    ///
    /// # Errors
    ///
    /// Returns an error only if the implicit initialization fails.
    pub fn dimen(&self, id: ResourceId) -> Result<Option<Dimension>> {
        self.initialize()?;
        Ok(self.tables.dimens.get(&id).map(|e| *e.value()))
    }

    /// Looks up an attribute definition.
    ///
    /// # Errors
    ///
    /// Returns an error only if the implicit initialization fails.
    pub fn attr(&self, id: ResourceId) -> Result<Option<AttrRc>> {
        self.initialize()?;
        Ok(self.tables.attrs.get(&id).map(|e| e.value().clone()))
    }

    /// Looks up a raw resource, returning the file handle to open on demand.
    ///
    /// # Errors
    ///
    /// Returns an error only if the implicit initialization fails.
    pub fn raw(&self, id: ResourceId) -> Result<Option<EntryRc>> {
        self.initialize()?;
        Ok(self.tables.raws.get(&id).map(|e| e.value().clone()))
    }

    /// Looks up a parsed layout node graph.
    ///
    /// # Errors
    ///
    /// Returns an error only if the implicit initialization fails.
    pub fn layout(&self, id: ResourceId) -> Result<Option<ResourceNodeRc>> {
        self.initialize()?;
        Ok(self.tables.layouts.get(&id).map(|e| e.value().clone()))
    }

    /// Looks up a parsed menu node graph.
    ///
    /// # Errors
    ///
    /// Returns an error only if the implicit initialization fails.
    pub fn menu(&self, id: ResourceId) -> Result<Option<ResourceNodeRc>> {
        self.initialize()?;
        Ok(self.tables.menus.get(&id).map(|e| e.value().clone()))
    }

    /// Resolves an id back to its qualified name, for diagnostics and error
    /// messages. Pure registry lookup; does not trigger initialization.
    #[must_use]
    pub fn resolve_name(&self, id: ResourceId) -> Option<ResourceName> {
        self.registry.resolve_name(id)
    }

    /// Resolves a qualified name to its id. Pure registry lookup; does not
    /// trigger initialization.
    #[must_use]
    pub fn resolve_id(&self, name: &ResourceName) -> Option<ResourceId> {
        self.registry.resolve_id(name)
    }

    /// Returns the identifier registry.
    #[must_use]
    pub fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }

    /// Returns the diagnostics collected by the load passes.
    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}
