//! Resource loading infrastructure.
//!
//! This module provides the core infrastructure for populating the typed
//! tables from qualified resource directories in a dependency-aware and
//! parallelized manner. It exposes the `ResourceLoader` trait, dependency
//! graph construction, and the parallel execution entry point used by the
//! store.
//!
//! # Modules
//! - `graph`: Dependency graph and topological sorting for loader execution.
//! - `context`: Shared per-load state handed to every loader.
//! - One module per resource kind: `strings`, `string_arrays`, `colors`,
//!   `dimens`, `attrs`, `raws`, `layouts`, `menus`.
//!
//! # Usage
//! Implement the `ResourceLoader` trait for each resource kind, then let
//! `execute_loaders_in_parallel` run the full loader set level by level.

mod attrs;
mod colors;
mod context;
mod dimens;
mod graph;
mod layouts;
mod menus;
mod nodes;
mod raws;
pub(crate) mod string_arrays;
mod strings;

pub(crate) use context::{LoadContext, LoadPass, XmlContext};

use rayon::prelude::*;

use crate::resources::diagnostics::DiagnosticCategory;
use crate::resources::id::ResourceId;
use crate::resources::kind::{Families, ResourceKind};
use crate::resources::xml::Element;
use crate::{Error, Result};

pub(crate) static LOADERS: [&'static dyn ResourceLoader; 8] = [
    &strings::StringLoader,
    &string_arrays::StringArrayLoader,
    &colors::ColorLoader,
    &dimens::DimenLoader,
    &attrs::AttrLoader,
    &raws::RawLoader,
    &layouts::LayoutLoader,
    &menus::MenuLoader,
];

/// Trait for resource loaders.
///
/// Implement this trait for each loader that populates one typed table. The
/// loader must declare the kind it produces, the directory families it reads
/// from, and the kinds it depends on.
pub(crate) trait ResourceLoader: Send + Sync {
    /// Populate this loader's table using the provided [`LoadContext`].
    ///
    /// # Arguments
    /// * `context` - The shared state of the running load.
    ///
    /// # Returns
    /// * `Result<()>` - `Ok(())` if loading succeeds, or an error otherwise.
    ///   Skipped files and entries are not errors; they go through the
    ///   context's diagnostics.
    fn load(&self, context: &LoadContext) -> Result<()>;

    /// Get the resource kind this loader produces.
    fn kind(&self) -> ResourceKind;

    /// Get the directory families this loader reads from.
    fn families(&self) -> Families;

    /// Get the kinds whose tables must be fully populated before this loader
    /// runs.
    fn dependencies(&self) -> &'static [ResourceKind];
}

/// Build a dependency graph from the full loader set.
fn build_dependency_graph(
    loaders: &[&'static dyn ResourceLoader],
) -> Result<graph::LoaderGraph<'static>> {
    let mut graph = graph::LoaderGraph::new();

    for loader in loaders {
        graph.add_loader(*loader);
    }

    graph.build_relationships()?;
    Ok(graph)
}

/// Execute all loaders in parallel respecting dependencies.
///
/// Loaders are executed level by level according to their dependencies;
/// loaders within a level run in parallel and own disjoint tables. If any
/// loader fails, the process is aborted and the first error is returned.
pub(crate) fn execute_loaders_in_parallel(context: &LoadContext) -> Result<()> {
    let graph = build_dependency_graph(&LOADERS)?;
    let levels = graph.topological_levels()?;

    for level in levels {
        let results: Vec<Result<()>> = level
            .par_iter()
            .map(|loader| loader.load(context))
            .collect();

        for result in results {
            result?;
        }
    }

    Ok(())
}

/// Walks every `<resources>` document of the values family and hands each
/// top-level element named `tag` to `visit`, with its declared name already
/// resolved to an id.
///
/// This is the shared shape of all value loaders. Elements under other tags
/// are someone else's entries and are skipped silently; an element without a
/// `name` attribute or with a name the registry does not know is skipped
/// with a diagnostic, never failing the document.
fn for_each_value_entry<F>(
    context: &LoadContext,
    tag: &str,
    kind: ResourceKind,
    mut visit: F,
) -> Result<()>
where
    F: FnMut(&XmlContext<'_>, ResourceId, &Element),
{
    context.visit_documents(Families::VALUES, |xml_context, document| {
        if document.root.name != "resources" {
            return;
        }
        for element in document.root.child_elements() {
            if element.name != tag {
                continue;
            }
            match resolve_entry_name(context, xml_context, kind, element) {
                Ok(id) => visit(xml_context, id, element),
                Err(e) => {
                    context.diagnostics.warning(
                        DiagnosticCategory::Reference,
                        format!("skipping {tag} in {}: {e}", xml_context.path),
                    );
                }
            }
        }
    })
}

/// Resolves the declared `name` attribute of a value element against the
/// registry, scoped to the context package.
fn resolve_entry_name(
    context: &LoadContext,
    xml_context: &XmlContext<'_>,
    kind: ResourceKind,
    element: &Element,
) -> Result<ResourceId> {
    let name = element
        .attribute("name")
        .ok_or_else(|| Error::UnresolvedReference(format!("<{}> without name", element.name)))?;

    context
        .registry
        .resolve_entry(xml_context.package, kind, name)
        .ok_or_else(|| {
            Error::UnresolvedReference(format!("{}:{}/{}", xml_context.package, kind, name))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::EnumCount;

    #[test]
    fn one_loader_per_kind() {
        assert_eq!(LOADERS.len(), ResourceKind::COUNT);

        let mut kinds: Vec<ResourceKind> = LOADERS.iter().map(|l| l.kind()).collect();
        kinds.sort_by_key(|kind| *kind as u32);
        kinds.dedup();
        assert_eq!(kinds.len(), LOADERS.len());
    }

    #[test]
    fn families_match_kinds() {
        for loader in LOADERS {
            assert!(
                loader.families().intersects(loader.kind().family()),
                "{:?} does not read its own family",
                loader.kind()
            );
        }
    }
}
