//! Resource kinds: the typed categories this crate can load and resolve.

use std::fmt;

use bitflags::bitflags;
use strum::{EnumCount, EnumIter};

/// Identifiers for the resource kinds this crate can load and resolve.
///
/// Each variant corresponds to one typed table in the resource store and to
/// one loader in the loading pipeline. The numeric values are the kind field
/// used when assembling ids with [`crate::ResourceId::from_parts`]; ids read
/// from generated constants keep whatever layout their generator chose.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter, EnumCount)]
pub enum ResourceKind {
    /// Plain localized strings from `values*/` documents (0x01)
    String = 0x01,

    /// Ordered string arrays, items literal or `@string/` references (0x02)
    StringArray = 0x02,

    /// Packed ARGB color values (0x03)
    Color = 0x03,

    /// Dimension values with a unit, such as `16dp` (0x04)
    Dimen = 0x04,

    /// Attribute definitions consumed when typing inline XML attributes (0x05)
    Attr = 0x05,

    /// Opaque files from `raw*/` directories, keyed by filename stem (0x06)
    Raw = 0x06,

    /// Parsed layout node graphs (0x07)
    Layout = 0x07,

    /// Parsed menu node graphs (0x08)
    Menu = 0x08,
}

impl ResourceKind {
    /// Returns the canonical type name used in qualified references and
    /// generated-constants input, e.g. `"string"` or `"layout"`.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            ResourceKind::String => "string",
            ResourceKind::StringArray => "array",
            ResourceKind::Color => "color",
            ResourceKind::Dimen => "dimen",
            ResourceKind::Attr => "attr",
            ResourceKind::Raw => "raw",
            ResourceKind::Layout => "layout",
            ResourceKind::Menu => "menu",
        }
    }

    /// Parses a type name back into a kind.
    ///
    /// Accepts both `"array"` (the generated-constants spelling) and
    /// `"string-array"` (the document element spelling).
    #[must_use]
    pub fn from_type_name(name: &str) -> Option<ResourceKind> {
        match name {
            "string" => Some(ResourceKind::String),
            "array" | "string-array" => Some(ResourceKind::StringArray),
            "color" => Some(ResourceKind::Color),
            "dimen" => Some(ResourceKind::Dimen),
            "attr" => Some(ResourceKind::Attr),
            "raw" => Some(ResourceKind::Raw),
            "layout" => Some(ResourceKind::Layout),
            "menu" => Some(ResourceKind::Menu),
            _ => None,
        }
    }

    /// Returns the directory family this kind is loaded from.
    #[must_use]
    pub fn family(&self) -> Families {
        match self {
            ResourceKind::String
            | ResourceKind::StringArray
            | ResourceKind::Color
            | ResourceKind::Dimen
            | ResourceKind::Attr => Families::VALUES,
            ResourceKind::Raw => Families::RAW,
            ResourceKind::Layout => Families::LAYOUT,
            ResourceKind::Menu => Families::MENU,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

bitflags! {
    /// Directory families a loader registers interest in.
    ///
    /// A family groups every qualified variant of one base directory prefix:
    /// `values`, `values-en` and `values-land` all belong to
    /// [`Families::VALUES`]. Loaders declare a set of families and the
    /// orchestrator hands them every matching directory of every pass root.
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    pub struct Families: u8 {
        /// `values*` directories holding `<resources>` documents
        const VALUES = 1 << 0;
        /// `layout*` directories, one document per layout
        const LAYOUT = 1 << 1;
        /// `menu*` directories, one document per menu
        const MENU = 1 << 2;
        /// `raw*` directories holding opaque files
        const RAW = 1 << 3;
    }
}

impl Families {
    /// Maps a base directory prefix to its family.
    ///
    /// Unknown prefixes return the empty set; such directories are not
    /// resource directories and are skipped by every loader.
    #[must_use]
    pub fn for_prefix(prefix: &str) -> Families {
        match prefix {
            "values" => Families::VALUES,
            "layout" => Families::LAYOUT,
            "menu" => Families::MENU,
            "raw" => Families::RAW,
            _ => Families::empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn type_name_roundtrip() {
        for kind in ResourceKind::iter() {
            assert_eq!(ResourceKind::from_type_name(kind.type_name()), Some(kind));
        }
    }

    #[test]
    fn accepts_element_spelling_for_arrays() {
        assert_eq!(
            ResourceKind::from_type_name("string-array"),
            Some(ResourceKind::StringArray)
        );
    }

    #[test]
    fn unknown_type_name() {
        assert_eq!(ResourceKind::from_type_name("drawable9000"), None);
    }

    #[test]
    fn every_kind_has_a_family() {
        for kind in ResourceKind::iter() {
            assert!(!kind.family().is_empty());
        }
    }

    #[test]
    fn family_prefixes() {
        assert_eq!(Families::for_prefix("values"), Families::VALUES);
        assert_eq!(Families::for_prefix("layout"), Families::LAYOUT);
        assert_eq!(Families::for_prefix("menu"), Families::MENU);
        assert_eq!(Families::for_prefix("raw"), Families::RAW);
        assert!(Families::for_prefix("drawable").is_empty());
        assert!(Families::for_prefix("").is_empty());
    }

    #[test]
    fn display_uses_type_name() {
        assert_eq!(format!("{}", ResourceKind::StringArray), "array");
        assert_eq!(format!("{}", ResourceKind::Layout), "layout");
    }
}
