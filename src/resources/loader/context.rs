//! Shared state for one load pass over all roots.
//!
//! The [`LoadContext`] is created by the store right before the loaders run,
//! passed to every loader, and dropped when loading completes. It carries the
//! pass list (system first, then application roots in caller order), the
//! identifier registry, the typed tables, the diagnostics container, and a
//! concurrent cache of parsed documents so that several loaders interested in
//! the same file parse it exactly once.

use std::sync::Arc;

use dashmap::DashMap;

use crate::fs::EntryRc;
use crate::resources::diagnostics::{DiagnosticCategory, Diagnostics};
use crate::resources::kind::Families;
use crate::resources::qualifiers;
use crate::resources::registry::ResourceRegistry;
use crate::resources::tables::Tables;
use crate::resources::xml::{self, Document};
use crate::Result;

/// One root to load: the system pass or one application pass.
pub(crate) struct LoadPass {
    /// The resource root directory
    pub root: EntryRc,
    /// The package that names declared in this root resolve against
    pub package: String,
}

/// Directory and package context attached to every dispatched document.
pub(crate) struct XmlContext<'a> {
    /// Index of the pass this document belongs to, in load order
    pub pass: usize,
    /// The package of the pass this document belongs to
    pub package: &'a str,
    /// The raw qualifier string of the parent directory, e.g. `"en-rUS"`
    pub qualifiers: String,
    /// The source path of the document, for diagnostics
    pub path: String,
}

/// Shared state handed to every loader for the duration of one load.
pub(crate) struct LoadContext<'a> {
    /// Pass roots in load order; the system pass is always first
    pub passes: &'a [LoadPass],
    /// The frozen identifier registry
    pub registry: &'a ResourceRegistry,
    /// The typed tables being populated
    pub tables: &'a Tables,
    /// Diagnostics for skipped files and entries
    pub diagnostics: &'a Diagnostics,
    /// Parsed-document cache keyed by pass and source path. Two passes may
    /// use the same relative path for different files, so the pass index is
    /// part of the key; `None` records a document that already failed to
    /// parse so it is reported only once
    documents: DashMap<(usize, String), Option<Arc<Document>>>,
}

impl<'a> LoadContext<'a> {
    /// Creates the context for one load.
    pub fn new(
        passes: &'a [LoadPass],
        registry: &'a ResourceRegistry,
        tables: &'a Tables,
        diagnostics: &'a Diagnostics,
    ) -> Self {
        LoadContext {
            passes,
            registry,
            tables,
            diagnostics,
            documents: DashMap::new(),
        }
    }

    /// Returns the parsed document for `file` within pass `pass`, parsing it
    /// on first access.
    ///
    /// A document that fails to parse is reported once through diagnostics
    /// and yields `None` for every interested loader.
    pub fn document(&self, pass: usize, file: &EntryRc) -> Option<Arc<Document>> {
        let slot = self
            .documents
            .entry((pass, file.path()))
            .or_insert_with(|| self.parse_file(file));
        slot.clone()
    }

    fn parse_file(&self, file: &EntryRc) -> Option<Arc<Document>> {
        let data = match file.data() {
            Ok(data) => data,
            Err(e) => {
                self.diagnostics.error(
                    DiagnosticCategory::Io,
                    format!("skipping {}: {e}", file.path()),
                );
                return None;
            }
        };
        match xml::parse(&data, &file.path()) {
            Ok(document) => Some(Arc::new(document)),
            Err(e) => {
                self.diagnostics
                    .warning(DiagnosticCategory::Xml, format!("skipping file: {e}"));
                None
            }
        }
    }

    /// Visits every file of the matching directory families, pass by pass in
    /// load order.
    ///
    /// Directories whose base prefix maps to none of `families` are skipped,
    /// as are directories whose name fails the qualifier split: they are not
    /// resource directories from this loader's point of view. An absent or
    /// empty root is a silent no-op. Within one pass, directories and files
    /// arrive in sorted name order, so repeated loads store byte-identical
    /// tables.
    pub fn visit_files<F>(&self, families: Families, mut visit: F) -> Result<()>
    where
        F: FnMut(&XmlContext<'_>, &EntryRc),
    {
        for (pass_index, pass) in self.passes.iter().enumerate() {
            if !pass.root.is_dir() {
                continue;
            }
            let subdirs = match pass.root.children() {
                Ok(children) => children,
                Err(e) => {
                    self.diagnostics.error(
                        DiagnosticCategory::Io,
                        format!("skipping root {}: {e}", pass.root.path()),
                    );
                    continue;
                }
            };

            for dir in subdirs.iter().filter(|d| d.is_dir()) {
                let Ok(qualified) = qualifiers::split_dir_name(dir.name()) else {
                    continue;
                };
                if !families.intersects(Families::for_prefix(&qualified.base)) {
                    continue;
                }

                let files = match dir.children() {
                    Ok(children) => children,
                    Err(e) => {
                        self.diagnostics.error(
                            DiagnosticCategory::Io,
                            format!("skipping directory {}: {e}", dir.path()),
                        );
                        continue;
                    }
                };

                for file in files.iter().filter(|f| !f.is_dir()) {
                    let context = XmlContext {
                        pass: pass_index,
                        package: &pass.package,
                        qualifiers: qualified.qualifiers.clone(),
                        path: file.path(),
                    };
                    visit(&context, file);
                }
            }
        }
        Ok(())
    }

    /// Visits every parsed XML document of the matching directory families,
    /// pass by pass in load order.
    ///
    /// Only files with an `.xml` extension are considered; documents that
    /// fail to parse are skipped with a diagnostic.
    pub fn visit_documents<F>(&self, families: Families, mut visit: F) -> Result<()>
    where
        F: FnMut(&XmlContext<'_>, &Document),
    {
        self.visit_files(families, |context, file| {
            if !file.name().ends_with(".xml") {
                return;
            }
            if let Some(document) = self.document(context.pass, file) {
                visit(context, &document);
            }
        })
    }
}
