//! Color loader implementation.

use crate::resources::diagnostics::DiagnosticCategory;
use crate::resources::kind::{Families, ResourceKind};
use crate::resources::loader::{for_each_value_entry, LoadContext, ResourceLoader};
use crate::Result;

/// Loader for `<color>` entries in values documents.
pub(crate) struct ColorLoader;

impl ResourceLoader for ColorLoader {
    fn load(&self, context: &LoadContext) -> Result<()> {
        for_each_value_entry(
            context,
            "color",
            ResourceKind::Color,
            |xml_context, id, element| {
                let literal = element.text();
                match parse_color(literal.trim()) {
                    Some(color) => {
                        context.tables.colors.insert(id, color);
                    }
                    None => {
                        context.diagnostics.warning(
                            DiagnosticCategory::Value,
                            format!(
                                "skipping color {id}: malformed literal '{}' in {}",
                                literal.trim(),
                                xml_context.path
                            ),
                        );
                    }
                }
            },
        )
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::Color
    }

    fn families(&self) -> Families {
        Families::VALUES
    }

    fn dependencies(&self) -> &'static [ResourceKind] {
        &[]
    }
}

/// Parses a `#RRGGBB` or `#AARRGGBB` literal into a packed ARGB value.
///
/// A literal without an alpha component gets full opacity. Anything else,
/// including the `#RGB` shorthand, is rejected.
pub(crate) fn parse_color(literal: &str) -> Option<u32> {
    let hex = literal.strip_prefix('#')?;
    match hex.len() {
        6 => u32::from_str_radix(hex, 16).ok().map(|v| v | 0xFF00_0000),
        8 => u32::from_str_radix(hex, 16).ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn implicit_alpha_is_opaque() {
        assert_eq!(parse_color("#FF0000"), Some(0xFFFF_0000));
        assert_eq!(parse_color("#FF0000"), parse_color("#FFFF0000"));
    }

    #[test]
    fn explicit_alpha_is_kept() {
        assert_eq!(parse_color("#80FF0000"), Some(0x80FF_0000));
        assert_eq!(parse_color("#00000000"), Some(0x0000_0000));
    }

    #[test]
    fn case_insensitive_digits() {
        assert_eq!(parse_color("#ff00ff"), Some(0xFFFF_00FF));
    }

    #[test]
    fn rejects_malformed_literals() {
        assert_eq!(parse_color("red"), None);
        assert_eq!(parse_color("#F00"), None);
        assert_eq!(parse_color("#GGGGGG"), None);
        assert_eq!(parse_color("#FF00001"), None);
        assert_eq!(parse_color(""), None);
    }
}
