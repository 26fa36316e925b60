//! Menu loader implementation.

use crate::resources::kind::{Families, ResourceKind};
use crate::resources::loader::nodes::load_node_documents;
use crate::resources::loader::{LoadContext, ResourceLoader};
use crate::Result;

/// Loader for menu documents.
///
/// Each document in a `menu` family directory becomes one abstract node
/// graph, exactly like layouts; only the directory family and the id kind
/// differ.
pub(crate) struct MenuLoader;

impl ResourceLoader for MenuLoader {
    fn load(&self, context: &LoadContext) -> Result<()> {
        load_node_documents(
            context,
            Families::MENU,
            ResourceKind::Menu,
            &context.tables.menus,
        )
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::Menu
    }

    fn families(&self) -> Families {
        Families::MENU
    }

    fn dependencies(&self) -> &'static [ResourceKind] {
        &[ResourceKind::Attr]
    }
}
