//! Stored value types and the typed table definitions.
//!
//! Each resource kind stores its entries in one concurrent map from
//! [`ResourceId`] to a typed value. Insertion replaces any existing entry
//! with the same id, which is what realizes the "last loaded wins" override
//! semantics: the system pass populates the tables first and every later
//! application pass overwrites colliding ids.
//!
//! # Key Components
//!
//! - [`Tables`] - All typed tables of one resource store
//! - [`AttrDef`] / [`AttrFormats`] - Attribute definition metadata
//! - [`Dimension`] / [`DimenUnit`] - Parsed dimension values
//! - [`ResourceNode`] / [`AttrValue`] - Abstract layout/menu node graphs

use std::sync::Arc;

use bitflags::bitflags;
use crossbeam_skiplist::SkipMap;

use crate::fs::EntryRc;
use crate::resources::id::ResourceId;

/// A reference-counted stored string.
pub type StringRc = Arc<str>;
/// Map of all loaded string resources.
pub type StringMap = SkipMap<ResourceId, StringRc>;

/// A reference-counted stored string array.
pub type StringArrayRc = Arc<Vec<String>>;
/// Map of all loaded string-array resources.
pub type StringArrayMap = SkipMap<ResourceId, StringArrayRc>;

/// Map of all loaded color resources as packed ARGB values.
pub type ColorMap = SkipMap<ResourceId, u32>;

/// Map of all loaded dimension resources.
pub type DimenMap = SkipMap<ResourceId, Dimension>;

/// A reference-counted attribute definition.
pub type AttrRc = Arc<AttrDef>;
/// Map of all loaded attribute definitions.
pub type AttrMap = SkipMap<ResourceId, AttrRc>;

/// Map of all raw resources, each an opaque byte supplier.
pub type RawMap = SkipMap<ResourceId, EntryRc>;

/// A reference-counted layout or menu node.
pub type ResourceNodeRc = Arc<ResourceNode>;
/// Map of parsed layout or menu node graphs.
pub type NodeMap = SkipMap<ResourceId, ResourceNodeRc>;

/// All typed tables of one resource store.
///
/// The store owns exactly one instance; loaders receive a shared reference
/// for the duration of one load pass and do not retain it afterwards.
#[derive(Default)]
pub struct Tables {
    /// String resources
    pub strings: StringMap,
    /// String-array resources
    pub string_arrays: StringArrayMap,
    /// Color resources
    pub colors: ColorMap,
    /// Dimension resources
    pub dimens: DimenMap,
    /// Attribute definitions
    pub attrs: AttrMap,
    /// Raw file resources
    pub raws: RawMap,
    /// Layout node graphs
    pub layouts: NodeMap,
    /// Menu node graphs
    pub menus: NodeMap,
}

impl Tables {
    /// Creates a new set of empty tables.
    #[must_use]
    pub fn new() -> Tables {
        Tables::default()
    }
}

/// A parsed dimension value: numeric magnitude plus unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimension {
    /// The numeric magnitude, e.g. `16.0` in `16dp`
    pub value: f32,
    /// The unit the magnitude is expressed in
    pub unit: DimenUnit,
}

/// Units a dimension value can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DimenUnit {
    /// Raw pixels (`px`)
    Px,
    /// Density-independent pixels (`dp` or `dip`)
    Dp,
    /// Scale-independent pixels (`sp`)
    Sp,
    /// Typographic points (`pt`)
    Pt,
    /// Inches (`in`)
    In,
    /// Millimeters (`mm`)
    Mm,
}

impl DimenUnit {
    /// Parses a unit suffix, accepting the `dip` alias for `dp`.
    #[must_use]
    pub fn from_suffix(suffix: &str) -> Option<DimenUnit> {
        match suffix {
            "px" => Some(DimenUnit::Px),
            "dp" | "dip" => Some(DimenUnit::Dp),
            "sp" => Some(DimenUnit::Sp),
            "pt" => Some(DimenUnit::Pt),
            "in" => Some(DimenUnit::In),
            "mm" => Some(DimenUnit::Mm),
            _ => None,
        }
    }
}

bitflags! {
    /// Value formats an attribute definition accepts.
    ///
    /// Parsed from the `format` attribute of an `<attr>` element, e.g.
    /// `format="reference|color"`. An attribute with `<enum>` children
    /// accepts [`AttrFormats::ENUM`] even without a declared format.
    #[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
    pub struct AttrFormats: u16 {
        /// `@type/name` references to other resources
        const REFERENCE = 1 << 0;
        /// Free-form text
        const STRING = 1 << 1;
        /// `#RRGGBB` / `#AARRGGBB` color literals
        const COLOR = 1 << 2;
        /// `true` / `false`
        const BOOLEAN = 1 << 3;
        /// Decimal integers
        const INTEGER = 1 << 4;
        /// Floating point numbers
        const FLOAT = 1 << 5;
        /// Dimension values with a unit
        const DIMENSION = 1 << 6;
        /// One of the definition's named enum values
        const ENUM = 1 << 7;
    }
}

impl AttrFormats {
    /// Parses one `format` token, e.g. `"reference"`.
    #[must_use]
    pub fn from_token(token: &str) -> Option<AttrFormats> {
        match token {
            "reference" => Some(AttrFormats::REFERENCE),
            "string" => Some(AttrFormats::STRING),
            "color" => Some(AttrFormats::COLOR),
            "boolean" => Some(AttrFormats::BOOLEAN),
            "integer" => Some(AttrFormats::INTEGER),
            "float" => Some(AttrFormats::FLOAT),
            "dimension" => Some(AttrFormats::DIMENSION),
            "enum" => Some(AttrFormats::ENUM),
            _ => None,
        }
    }
}

/// An attribute definition: the metadata that drives typing of inline XML
/// attribute values in layout and menu documents.
///
/// Stores no rendered value itself.
#[derive(Debug, Clone, PartialEq)]
pub struct AttrDef {
    /// The attribute name without any namespace prefix
    pub name: String,
    /// The accepted value formats
    pub formats: AttrFormats,
    /// Named enum values, in declaration order
    pub enum_values: Vec<(String, u32)>,
}

impl AttrDef {
    /// Looks up a named enum value of this definition.
    #[must_use]
    pub fn enum_value(&self, name: &str) -> Option<u32> {
        self.enum_values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }
}

/// One node of an abstract layout or menu graph.
///
/// The graph captures tag names, typed attributes and child order; it never
/// references platform widget types. Materializing the graph into live
/// objects is the consumer's concern.
#[derive(Debug, Clone)]
pub struct ResourceNode {
    /// The element tag, e.g. `"LinearLayout"` or `"item"`
    pub tag: String,
    /// Attributes in document order, typed via the attribute definitions
    pub attributes: Vec<TypedAttribute>,
    /// Child nodes in document order
    pub children: Vec<ResourceNodeRc>,
}

impl ResourceNode {
    /// Returns the typed value of the attribute `name`, matching the local
    /// name with any namespace prefix ignored.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        self.attributes
            .iter()
            .find(|a| a.local_name() == name)
            .map(|a| &a.value)
    }
}

/// One typed attribute of a [`ResourceNode`].
#[derive(Debug, Clone)]
pub struct TypedAttribute {
    /// The attribute name as written, including any namespace prefix
    pub name: String,
    /// The typed value
    pub value: AttrValue,
}

impl TypedAttribute {
    /// Returns the attribute name with any namespace prefix stripped.
    #[must_use]
    pub fn local_name(&self) -> &str {
        match self.name.rsplit_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }
}

/// A typed inline attribute value.
///
/// Typing is driven by the attribute definitions loaded into the attr table;
/// values that fit none of the declared formats fall back to
/// [`AttrValue::Text`].
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// Untyped or free-form text
    Text(String),
    /// A boolean literal
    Boolean(bool),
    /// An integer literal
    Integer(i64),
    /// A floating point literal
    Float(f32),
    /// A packed ARGB color literal
    Color(u32),
    /// A dimension literal
    Dimension(Dimension),
    /// A resolved reference to another resource
    Reference(ResourceId),
    /// A named enum value of the attribute's definition
    Enum {
        /// The name as written in the document
        name: String,
        /// The value declared for that name
        value: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skipmap_insert_overwrites() {
        let strings = StringMap::new();
        let id = ResourceId(0x7f01_0001);
        strings.insert(id, Arc::from("first"));
        strings.insert(id, Arc::from("second"));

        assert_eq!(strings.len(), 1);
        assert_eq!(&**strings.get(&id).unwrap().value(), "second");
    }

    #[test]
    fn dimen_unit_suffixes() {
        assert_eq!(DimenUnit::from_suffix("dp"), Some(DimenUnit::Dp));
        assert_eq!(DimenUnit::from_suffix("dip"), Some(DimenUnit::Dp));
        assert_eq!(DimenUnit::from_suffix("px"), Some(DimenUnit::Px));
        assert_eq!(DimenUnit::from_suffix("furlong"), None);
    }

    #[test]
    fn attr_format_tokens() {
        assert_eq!(
            AttrFormats::from_token("reference"),
            Some(AttrFormats::REFERENCE)
        );
        assert_eq!(AttrFormats::from_token("color"), Some(AttrFormats::COLOR));
        assert_eq!(AttrFormats::from_token("gradient"), None);
    }

    #[test]
    fn attr_def_enum_lookup() {
        let def = AttrDef {
            name: "orientation".to_string(),
            formats: AttrFormats::ENUM,
            enum_values: vec![
                ("horizontal".to_string(), 0),
                ("vertical".to_string(), 1),
            ],
        };
        assert_eq!(def.enum_value("vertical"), Some(1));
        assert_eq!(def.enum_value("diagonal"), None);
    }

    #[test]
    fn node_attribute_matches_local_name() {
        let node = ResourceNode {
            tag: "LinearLayout".to_string(),
            attributes: vec![TypedAttribute {
                name: "android:orientation".to_string(),
                value: AttrValue::Enum {
                    name: "vertical".to_string(),
                    value: 1,
                },
            }],
            children: Vec::new(),
        };

        assert_eq!(
            node.attribute("orientation"),
            Some(&AttrValue::Enum {
                name: "vertical".to_string(),
                value: 1
            })
        );
        assert!(node.attribute("gravity").is_none());
    }
}
