//! String loader implementation.

use std::sync::Arc;

use crate::resources::kind::{Families, ResourceKind};
use crate::resources::loader::{for_each_value_entry, LoadContext, ResourceLoader};
use crate::Result;

/// Loader for `<string>` entries in values documents.
///
/// The element text becomes the stored string; nested markup such as simple
/// formatting tags is flattened to its text content.
pub(crate) struct StringLoader;

impl ResourceLoader for StringLoader {
    fn load(&self, context: &LoadContext) -> Result<()> {
        for_each_value_entry(context, "string", ResourceKind::String, |_, id, element| {
            let text = element.text();
            context
                .tables
                .strings
                .insert(id, Arc::from(text.trim()));
        })
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::String
    }

    fn families(&self) -> Families {
        Families::VALUES
    }

    fn dependencies(&self) -> &'static [ResourceKind] {
        &[]
    }
}
