//! Dependency graph management for parallel resource loading.
//!
//! Some loaders consume what other loaders produce: string arrays resolve
//! `@string/` references through the string table, and layout/menu loaders
//! type inline attributes through the attr table. The graph captures those
//! relationships and yields execution levels in which every loader's
//! dependencies were satisfied by an earlier level, so each level can run in
//! parallel.
//!
//! Graph construction is single-threaded; the generated plan is a plain
//! vector handed to the parallel executor.

use std::collections::{HashMap, HashSet};

use crate::resources::kind::ResourceKind;
use crate::resources::loader::ResourceLoader;
use crate::{Error::GraphError, Result};

/// A directed graph of loader dependencies keyed by resource kind.
///
/// # Lifecycle
///
/// 1. Create with `LoaderGraph::new()`
/// 2. Add loaders with `add_loader()`
/// 3. Build and validate with `build_relationships()`
/// 4. Generate the execution plan with `topological_levels()`
#[derive(Default)]
pub(crate) struct LoaderGraph<'a> {
    /// Maps a kind to its loader
    loaders: HashMap<ResourceKind, &'a dyn ResourceLoader>,
    /// Maps a kind to the set of kinds it depends on
    dependencies: HashMap<ResourceKind, HashSet<ResourceKind>>,
}

impl<'a> LoaderGraph<'a> {
    /// Creates a new empty loader graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a loader to the graph.
    ///
    /// Dependencies are not resolved until `build_relationships()` is
    /// called.
    pub fn add_loader(&mut self, loader: &'a dyn ResourceLoader) {
        self.loaders.insert(loader.kind(), loader);
        self.dependencies.entry(loader.kind()).or_default();
    }

    /// Builds dependency relationships after all loaders have been added.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError`] if a loader depends on a kind without a
    /// registered loader.
    pub fn build_relationships(&mut self) -> Result<()> {
        self.dependencies.values_mut().for_each(HashSet::clear);

        for (kind, loader) in &self.loaders {
            for dependency in loader.dependencies() {
                if !self.loaders.contains_key(dependency) {
                    return Err(GraphError(format!(
                        "Loader {kind:?} depends on kind {dependency:?}, but no loader for that kind exists"
                    )));
                }
                self.dependencies
                    .get_mut(kind)
                    .ok_or_else(|| {
                        GraphError(format!(
                            "Internal error: loader {kind:?} not found in dependencies map"
                        ))
                    })?
                    .insert(*dependency);
            }
        }

        Ok(())
    }

    /// Returns loaders grouped by dependency level (topological sort).
    ///
    /// Level 0 contains independent loaders; level N contains loaders
    /// depending only on loaders from levels 0 through N-1.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError`] if circular dependencies prevent a topological
    /// ordering.
    pub fn topological_levels(&self) -> Result<Vec<Vec<&'a dyn ResourceLoader>>> {
        let mut levels = Vec::new();
        let mut unscheduled: HashSet<ResourceKind> = self.loaders.keys().copied().collect();
        let mut satisfied: HashSet<ResourceKind> = HashSet::new();

        while !unscheduled.is_empty() {
            let mut ready: Vec<ResourceKind> = unscheduled
                .iter()
                .filter(|kind| {
                    self.dependencies
                        .get(kind)
                        .map(|deps| deps.iter().all(|dep| satisfied.contains(dep)))
                        .unwrap_or(true)
                })
                .copied()
                .collect();

            if ready.is_empty() {
                return Err(GraphError(
                    "Unable to resolve dependency order, possible circular dependency".to_string(),
                ));
            }

            // Stable level contents regardless of hash order.
            ready.sort_by_key(|kind| *kind as u32);

            let mut level = Vec::new();
            for kind in ready {
                if let Some(loader) = self.loaders.get(&kind) {
                    level.push(*loader);
                }
                unscheduled.remove(&kind);
                satisfied.insert(kind);
            }
            levels.push(level);
        }

        Ok(levels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::loader::LOADERS;

    #[test]
    fn builtin_loaders_form_valid_graph() {
        let mut graph = LoaderGraph::new();
        for loader in LOADERS {
            graph.add_loader(loader);
        }
        graph.build_relationships().unwrap();

        let levels = graph.topological_levels().unwrap();
        assert!(levels.len() >= 2);

        // Every loader is scheduled exactly once.
        let total: usize = levels.iter().map(Vec::len).sum();
        assert_eq!(total, LOADERS.len());

        // A loader only runs after everything it depends on.
        let mut seen = HashSet::new();
        for level in &levels {
            for loader in level {
                for dependency in loader.dependencies() {
                    assert!(
                        seen.contains(dependency),
                        "{:?} scheduled before its dependency {:?}",
                        loader.kind(),
                        dependency
                    );
                }
            }
            for loader in level {
                seen.insert(loader.kind());
            }
        }
    }

    #[test]
    fn missing_dependency_is_an_error() {
        let mut graph = LoaderGraph::new();
        // String arrays depend on strings; without a string loader the graph
        // must refuse to build.
        graph.add_loader(&crate::resources::loader::string_arrays::StringArrayLoader);
        assert!(graph.build_relationships().is_err());
    }
}
