//! Attribute-definition loader implementation.

use std::sync::Arc;

use crate::resources::diagnostics::DiagnosticCategory;
use crate::resources::kind::{Families, ResourceKind};
use crate::resources::loader::{resolve_entry_name, LoadContext, ResourceLoader, XmlContext};
use crate::resources::tables::{AttrDef, AttrFormats};
use crate::resources::xml::Element;
use crate::Result;

/// Loader for `<attr>` definitions in values documents.
///
/// Definitions appear both at the top level of `<resources>` and nested
/// inside `<declare-styleable>` blocks; both spellings feed the same table.
/// The stored metadata is consumed by the layout and menu loaders to type
/// inline attribute values; no rendered value is stored here.
pub(crate) struct AttrLoader;

impl ResourceLoader for AttrLoader {
    fn load(&self, context: &LoadContext) -> Result<()> {
        context.visit_documents(Families::VALUES, |xml_context, document| {
            if document.root.name != "resources" {
                return;
            }
            for element in document.root.child_elements() {
                if element.name == "attr" {
                    self.load_attr(context, xml_context, element);
                } else if element.name == "declare-styleable" {
                    for nested in element.child_elements() {
                        if nested.name == "attr" {
                            self.load_attr(context, xml_context, nested);
                        }
                    }
                }
            }
        })
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::Attr
    }

    fn families(&self) -> Families {
        Families::VALUES
    }

    fn dependencies(&self) -> &'static [ResourceKind] {
        &[]
    }
}

impl AttrLoader {
    fn load_attr(
        &self,
        context: &LoadContext,
        xml_context: &XmlContext<'_>,
        element: &Element,
    ) {
        let id = match resolve_entry_name(context, xml_context, ResourceKind::Attr, element) {
            Ok(id) => id,
            Err(e) => {
                context.diagnostics.warning(
                    DiagnosticCategory::Reference,
                    format!("skipping attr in {}: {e}", xml_context.path),
                );
                return;
            }
        };

        let name = element.attribute("name").unwrap_or_default().to_string();
        let mut formats = AttrFormats::empty();
        if let Some(declared) = element.attribute("format") {
            for token in declared.split('|').map(str::trim) {
                match AttrFormats::from_token(token) {
                    Some(format) => formats |= format,
                    None => {
                        context.diagnostics.warning(
                            DiagnosticCategory::Value,
                            format!(
                                "ignoring unknown attr format '{token}' on '{name}' in {}",
                                xml_context.path
                            ),
                        );
                    }
                }
            }
        }

        let mut enum_values = Vec::new();
        for child in element.child_elements() {
            if child.name != "enum" {
                continue;
            }
            let Some(value_name) = child.attribute("name") else {
                continue;
            };
            let Some(value) = child
                .attribute("value")
                .and_then(|v| parse_int(v.trim()))
            else {
                context.diagnostics.warning(
                    DiagnosticCategory::Value,
                    format!(
                        "ignoring enum value '{value_name}' of attr '{name}' in {}: bad value",
                        xml_context.path
                    ),
                );
                continue;
            };
            enum_values.push((value_name.to_string(), value));
        }

        if !enum_values.is_empty() {
            formats |= AttrFormats::ENUM;
        }
        // A styleable may re-declare an attr by bare name to include it in
        // its block; only declarations carrying a format or enum values
        // define anything.
        if formats.is_empty() {
            return;
        }

        context.tables.attrs.insert(
            id,
            Arc::new(AttrDef {
                name,
                formats,
                enum_values,
            }),
        );
    }
}

/// Parses a decimal or `0x`-prefixed enum value.
fn parse_int(raw: &str) -> Option<u32> {
    match raw.strip_prefix("0x") {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => raw.parse().ok(),
    }
}
