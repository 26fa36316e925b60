//! Shared node-graph construction for the layout and menu loaders.
//!
//! Both loaders turn whole documents into abstract [`ResourceNode`] graphs
//! keyed by the id the document's filename stem resolves to. Inline
//! attribute values are typed through the attribute definitions loaded by
//! the attr loader, which is why both depend on [`ResourceKind::Attr`].

use std::sync::Arc;

use crate::resources::diagnostics::DiagnosticCategory;
use crate::resources::kind::{Families, ResourceKind};
use crate::resources::loader::colors::parse_color;
use crate::resources::loader::dimens::parse_dimension;
use crate::resources::loader::{LoadContext, XmlContext};
use crate::resources::name::ResourceName;
use crate::resources::tables::{AttrFormats, AttrRc, AttrValue, NodeMap, ResourceNode, ResourceNodeRc, TypedAttribute};
use crate::resources::xml::Element;
use crate::Result;

/// Loads every XML document of `families` as one node graph keyed by its
/// filename stem, storing the graphs into `table`.
///
/// A stem the registry does not know is skipped with a diagnostic.
pub(crate) fn load_node_documents(
    context: &LoadContext,
    families: Families,
    kind: ResourceKind,
    table: &NodeMap,
) -> Result<()> {
    context.visit_files(families, |xml_context, file| {
        if !file.name().ends_with(".xml") {
            return;
        }
        let stem = file.name().trim_end_matches(".xml");

        let Some(id) = context
            .registry
            .resolve_entry(xml_context.package, kind, stem)
        else {
            context.diagnostics.warning(
                DiagnosticCategory::Reference,
                format!(
                    "skipping {kind} document {}: '{stem}' is not registered",
                    xml_context.path
                ),
            );
            return;
        };

        if let Some(document) = context.document(xml_context.pass, file) {
            let node = build_node(&document.root, xml_context, context);
            table.insert(id, node);
        }
    })
}

/// Recursively converts one element into a node, typing its attributes.
fn build_node(
    element: &Element,
    xml_context: &XmlContext<'_>,
    context: &LoadContext,
) -> ResourceNodeRc {
    let attributes = element
        .attributes
        .iter()
        // Namespace declarations configure the document, they are not
        // resource attributes.
        .filter(|a| a.name != "xmlns" && !a.name.starts_with("xmlns:"))
        .map(|a| {
            let def = attr_def(context, xml_context.package, &a.name);
            TypedAttribute {
                name: a.name.clone(),
                value: type_value(&a.value, def.as_deref(), xml_context.package, context),
            }
        })
        .collect();

    let children = element
        .child_elements()
        .map(|child| build_node(child, xml_context, context))
        .collect();

    Arc::new(ResourceNode {
        tag: element.name.clone(),
        attributes,
        children,
    })
}

/// Finds the attribute definition for an inline attribute name.
///
/// An `android:` prefix pins the lookup to the `android` package; any other
/// spelling resolves against the document's package first, falling back to
/// `android`.
fn attr_def(context: &LoadContext, package: &str, attr_name: &str) -> Option<AttrRc> {
    let (prefix, local) = match attr_name.rsplit_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, attr_name),
    };

    let lookup = |package: &str| {
        context
            .registry
            .resolve_entry(package, ResourceKind::Attr, local)
            .and_then(|id| context.tables.attrs.get(&id))
            .map(|entry| entry.value().clone())
    };

    match prefix {
        Some("android") => lookup("android"),
        _ => lookup(package).or_else(|| lookup("android")),
    }
}

/// Types one inline attribute value.
///
/// References resolve through the registry regardless of the definition;
/// other values try the definition's declared formats in a fixed order and
/// fall back to [`AttrValue::Text`].
fn type_value(
    raw: &str,
    def: Option<&crate::resources::tables::AttrDef>,
    package: &str,
    context: &LoadContext,
) -> AttrValue {
    if raw.starts_with('@') {
        if let Some(id) = ResourceName::parse_reference(raw, package)
            .and_then(|name| context.registry.resolve_id(&name))
        {
            return AttrValue::Reference(id);
        }
        context.diagnostics.warning(
            DiagnosticCategory::Reference,
            format!("keeping unresolved reference '{raw}' as text"),
        );
        return AttrValue::Text(raw.to_string());
    }

    if let Some(def) = def {
        if def.formats.contains(AttrFormats::ENUM) {
            if let Some(value) = def.enum_value(raw) {
                return AttrValue::Enum {
                    name: raw.to_string(),
                    value,
                };
            }
        }
        if def.formats.contains(AttrFormats::BOOLEAN) {
            match raw {
                "true" => return AttrValue::Boolean(true),
                "false" => return AttrValue::Boolean(false),
                _ => {}
            }
        }
        if def.formats.contains(AttrFormats::INTEGER) {
            if let Ok(value) = raw.parse::<i64>() {
                return AttrValue::Integer(value);
            }
        }
        if def.formats.contains(AttrFormats::COLOR) {
            if let Some(value) = parse_color(raw) {
                return AttrValue::Color(value);
            }
        }
        if def.formats.contains(AttrFormats::DIMENSION) {
            if let Some(value) = parse_dimension(raw) {
                return AttrValue::Dimension(value);
            }
        }
        if def.formats.contains(AttrFormats::FLOAT) {
            if let Ok(value) = raw.parse::<f32>() {
                return AttrValue::Float(value);
            }
        }
    }

    AttrValue::Text(raw.to_string())
}
