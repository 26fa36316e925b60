//! String-array loader implementation.

use std::sync::Arc;

use crate::resources::diagnostics::DiagnosticCategory;
use crate::resources::kind::{Families, ResourceKind};
use crate::resources::loader::{for_each_value_entry, LoadContext, ResourceLoader};
use crate::resources::name::ResourceName;
use crate::Result;

/// Loader for `<string-array>` entries in values documents.
///
/// Items are either literal text or `@string/...` references resolved
/// through the string table, which is why this loader depends on
/// [`ResourceKind::String`]. An item referencing a string that is not loaded
/// is omitted from the resulting array; unrelated items are preserved.
pub(crate) struct StringArrayLoader;

impl ResourceLoader for StringArrayLoader {
    fn load(&self, context: &LoadContext) -> Result<()> {
        for_each_value_entry(
            context,
            "string-array",
            ResourceKind::StringArray,
            |xml_context, id, element| {
                let mut items = Vec::new();
                for item in element.child_elements() {
                    if item.name != "item" {
                        continue;
                    }
                    let raw = item.text();
                    let raw = raw.trim();
                    match resolve_item(context, xml_context.package, raw) {
                        Some(value) => items.push(value),
                        None => {
                            context.diagnostics.warning(
                                DiagnosticCategory::Reference,
                                format!(
                                    "omitting array item '{raw}' in {}: unresolved reference",
                                    xml_context.path
                                ),
                            );
                        }
                    }
                }
                context.tables.string_arrays.insert(id, Arc::new(items));
            },
        )
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::StringArray
    }

    fn families(&self) -> Families {
        Families::VALUES
    }

    fn dependencies(&self) -> &'static [ResourceKind] {
        &[ResourceKind::String]
    }
}

/// Resolves one array item: a `@string/` reference indirects through the
/// string table, anything else is literal text.
fn resolve_item(context: &LoadContext, package: &str, raw: &str) -> Option<String> {
    if !raw.starts_with('@') {
        return Some(raw.to_string());
    }

    let name = ResourceName::parse_reference(raw, package)?;
    if name.kind != ResourceKind::String {
        return None;
    }
    let id = context.registry.resolve_id(&name)?;
    context
        .tables
        .strings
        .get(&id)
        .map(|entry| entry.value().to_string())
}
