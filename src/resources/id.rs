//! Resource ids: opaque 32-bit keys into the identifier registry.

use std::fmt;

/// A resource id referencing one entry in the identifier registry.
///
/// Resource ids are 32-bit values where:
/// - The high byte (bits 24-31) carries the package number
/// - The next byte (bits 16-23) carries the resource kind
/// - The low 16 bits (bits 0-15) carry the entry index
///
/// The layout is informational only: all matching throughout the crate is by
/// whole-id equality, and ids are treated as opaque once registered.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceId(pub u32);

impl ResourceId {
    /// Creates a new id from a raw 32-bit value
    #[must_use]
    pub fn new(value: u32) -> Self {
        ResourceId(value)
    }

    /// Assembles an id from its package, kind and entry fields
    #[must_use]
    pub fn from_parts(package: u8, kind: u8, entry: u16) -> Self {
        ResourceId((u32::from(package) << 24) | (u32::from(kind) << 16) | u32::from(entry))
    }

    /// Returns the raw id value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Extracts the package number from the id (high byte)
    #[must_use]
    pub fn package(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Extracts the kind field from the id (bits 16-23)
    #[must_use]
    pub fn kind(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Extracts the entry index from the id (low 16 bits)
    #[must_use]
    pub fn entry(&self) -> u16 {
        self.0 as u16
    }

    /// Returns true if this is a null id (value 0)
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for ResourceId {
    fn from(value: u32) -> Self {
        ResourceId(value)
    }
}

impl From<ResourceId> for u32 {
    fn from(id: ResourceId) -> Self {
        id.0
    }
}

impl fmt::Debug for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ResourceId(0x{:08x}, package: 0x{:02x}, kind: 0x{:02x}, entry: {})",
            self.0,
            self.package(),
            self.kind(),
            self.entry()
        )
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}
