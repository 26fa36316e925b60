//! Dimension loader implementation.

use crate::resources::diagnostics::DiagnosticCategory;
use crate::resources::kind::{Families, ResourceKind};
use crate::resources::loader::{for_each_value_entry, LoadContext, ResourceLoader};
use crate::resources::tables::{DimenUnit, Dimension};
use crate::Result;

/// Loader for `<dimen>` entries in values documents.
pub(crate) struct DimenLoader;

impl ResourceLoader for DimenLoader {
    fn load(&self, context: &LoadContext) -> Result<()> {
        for_each_value_entry(
            context,
            "dimen",
            ResourceKind::Dimen,
            |xml_context, id, element| {
                let literal = element.text();
                match parse_dimension(literal.trim()) {
                    Some(dimension) => {
                        context.tables.dimens.insert(id, dimension);
                    }
                    None => {
                        context.diagnostics.warning(
                            DiagnosticCategory::Value,
                            format!(
                                "skipping dimen {id}: malformed literal '{}' in {}",
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
        ResourceKind::Dimen
    }

    fn families(&self) -> Families {
        Families::VALUES
    }

    fn dependencies(&self) -> &'static [ResourceKind] {
        &[]
    }
}

/// Parses a dimension literal such as `16dp` or `-1.5in`.
///
/// The magnitude is everything before the unit suffix; a missing or unknown
/// unit rejects the literal.
pub(crate) fn parse_dimension(literal: &str) -> Option<Dimension> {
    let split = literal
        .find(|c: char| c.is_ascii_alphabetic())
        .filter(|&i| i > 0)?;
    let (magnitude, suffix) = literal.split_at(split);

    let value: f32 = magnitude.parse().ok()?;
    let unit = DimenUnit::from_suffix(suffix)?;
    Some(Dimension { value, unit })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_units() {
        assert_eq!(
            parse_dimension("16dp"),
            Some(Dimension {
                value: 16.0,
                unit: DimenUnit::Dp
            })
        );
        assert_eq!(
            parse_dimension("12.5sp"),
            Some(Dimension {
                value: 12.5,
                unit: DimenUnit::Sp
            })
        );
        assert_eq!(
            parse_dimension("-4px"),
            Some(Dimension {
                value: -4.0,
                unit: DimenUnit::Px
            })
        );
    }

    #[test]
    fn dip_is_dp() {
        assert_eq!(
            parse_dimension("8dip").map(|d| d.unit),
            Some(DimenUnit::Dp)
        );
    }

    #[test]
    fn rejects_malformed_literals() {
        assert_eq!(parse_dimension("16"), None);
        assert_eq!(parse_dimension("dp"), None);
        assert_eq!(parse_dimension("16parsec"), None);
        assert_eq!(parse_dimension(""), None);
        assert_eq!(parse_dimension("16 dp"), None);
    }
}
