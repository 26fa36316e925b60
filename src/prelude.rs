//! # rescope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types
//! and traits from the rescope library. Import this module to get quick access
//! to the essential types for resource loading and resolution.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all rescope operations
pub use crate::Error;

/// The result type used throughout rescope
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// The merged, queryable resource store
pub use crate::ResourceStore;

/// Builder collecting constants and roots for a store
pub use crate::ResourceStoreBuilder;

// ================================================================================================
// Identifier Model
// ================================================================================================

/// Stable 32-bit resource id
pub use crate::ResourceId;

/// Resource kind enumeration
pub use crate::ResourceKind;

/// Qualified resource name (package, kind, entry)
pub use crate::ResourceName;

/// Bidirectional name-to-id registry
pub use crate::ResourceRegistry;

/// Directory families loaders register interest in
pub use crate::Families;

// ================================================================================================
// Filesystem Abstraction
// ================================================================================================

/// Resource tree node trait and its reference-counted handle
pub use crate::{Entry, EntryRc};

/// File contents, mapped or in-memory
pub use crate::FileData;

/// In-memory resource tree for tests
pub use crate::Memory;

/// Disk-backed resource tree
pub use crate::Physical;

// ================================================================================================
// Stored Value Types
// ================================================================================================

/// Attribute definition metadata and value formats
pub use crate::resources::tables::{AttrDef, AttrFormats, AttrRc, AttrValue};

/// Parsed dimension values
pub use crate::resources::tables::{DimenUnit, Dimension};

/// Abstract layout/menu node graphs
pub use crate::resources::tables::{ResourceNode, ResourceNodeRc, TypedAttribute};

/// Qualifier split for directory names
pub use crate::resources::qualifiers::{split_dir_name, QualifiedDir};

// ================================================================================================
// Diagnostics
// ================================================================================================

/// Diagnostics container and entry types
pub use crate::diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticSeverity, Diagnostics};
