//! Layout loader implementation.

use crate::resources::kind::{Families, ResourceKind};
use crate::resources::loader::nodes::load_node_documents;
use crate::resources::loader::{LoadContext, ResourceLoader};
use crate::Result;

/// Loader for layout documents.
///
/// Each document in a `layout` family directory becomes one abstract node
/// graph; no platform widget is ever instantiated here.
pub(crate) struct LayoutLoader;

impl ResourceLoader for LayoutLoader {
    fn load(&self, context: &LoadContext) -> Result<()> {
        load_node_documents(
            context,
            Families::LAYOUT,
            ResourceKind::Layout,
            &context.tables.layouts,
        )
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::Layout
    }

    fn families(&self) -> Families {
        Families::LAYOUT
    }

    fn dependencies(&self) -> &'static [ResourceKind] {
        &[ResourceKind::Attr]
    }
}
