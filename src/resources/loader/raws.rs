//! Raw resource loader implementation.

use crate::resources::diagnostics::DiagnosticCategory;
use crate::resources::kind::{Families, ResourceKind};
use crate::resources::loader::{LoadContext, ResourceLoader};
use crate::Result;

/// Loader for opaque files in `raw` family directories.
///
/// No XML is parsed: each file is keyed by the id its filename stem resolves
/// to, and the stored value is the file handle itself, to be opened by the
/// consumer on demand.
pub(crate) struct RawLoader;

impl ResourceLoader for RawLoader {
    fn load(&self, context: &LoadContext) -> Result<()> {
        context.visit_files(Families::RAW, |xml_context, file| {
            let stem = match file.name().rsplit_once('.') {
                Some((stem, _)) if !stem.is_empty() => stem,
                _ => file.name(),
            };

            let Some(id) =
                context
                    .registry
                    .resolve_entry(xml_context.package, ResourceKind::Raw, stem)
            else {
                context.diagnostics.warning(
                    DiagnosticCategory::Reference,
                    format!(
                        "skipping raw file {}: '{stem}' is not registered",
                        xml_context.path
                    ),
                );
                return;
            };

            context.tables.raws.insert(id, file.clone());
        })
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::Raw
    }

    fn families(&self) -> Families {
        Families::RAW
    }

    fn dependencies(&self) -> &'static [ResourceKind] {
        &[]
    }
}
