// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(dead_code)]
//#![deny(unsafe_code)]
// - 'fs/physical.rs' uses mmap to map a file into memory

//! # rescope
//!
//! A cross-platform framework for loading and resolving qualified XML resource trees
//! into typed, integer-keyed tables. Built in pure Rust, `rescope` resolves a symbolic
//! resource identifier (an integer id or a qualified name) to a concrete typed value -
//! a string, string array, color, dimension, layout definition, menu definition, or
//! opaque byte stream - by searching layered directory trees whose names encode
//! locale/orientation qualifiers.
//!
//! ## Features
//!
//! - **📦 Layered override model** - A base ("system") resource set merged with any
//!   number of application sets, last loaded wins on colliding ids
//! - **🔍 Typed resolution** - One concurrent table per resource kind, explicit misses,
//!   no sentinel values
//! - **⚡ Parallel loading** - Dependency-ordered loaders executed level by level with
//!   rayon; each document parsed exactly once per load
//! - **🧩 Pluggable filesystem** - Directory walks and file reads go through a small
//!   trait, with memory-mapped disk access and an in-memory tree for tests
//! - **🛡️ Lenient by design** - A malformed document or an unresolvable entry skips
//!   that document or entry only, reported through a lock-free diagnostics container
//!
//! ## Quick Start
//!
//! Add `rescope` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! rescope = "0.2"
//! ```
//!
//! ### Using the Prelude
//!
//! For convenient access to the most commonly used types, import the prelude:
//!
//! ```rust
//! use rescope::prelude::*;
//!
//! let fs = Memory::new();
//! fs.add_file(
//!     "values/strings.xml",
//!     r#"<resources><string name="app_name">My App</string></resources>"#,
//! )?;
//!
//! let store = ResourceStoreBuilder::new()
//!     .register_text("app", "int string app_name 0x7f040000")?
//!     .app_root(fs.root(), "app")
//!     .build();
//!
//! let id = store
//!     .resolve_id(&ResourceName::new("app", ResourceKind::String, "app_name"))
//!     .unwrap();
//! assert_eq!(store.string(id)?.as_deref(), Some("My App"));
//! # Ok::<(), rescope::Error>(())
//! ```
//!
//! ### Layered Roots
//!
//! ```rust,no_run
//! use rescope::{Physical, ResourceStoreBuilder};
//!
//! let store = ResourceStoreBuilder::new()
//!     .register_text("android", "int string ok 0x01040000")?
//!     .register_text("app", "int string app_name 0x7f040000")?
//!     .system_root(Physical::open("/opt/platform/res"))
//!     .app_root(Physical::open("app/res"), "app")
//!     .app_root(Physical::open("overlay/res"), "app")
//!     .build();
//!
//! // The first lookup triggers the load: system pass first, then the
//! // application roots in the order they were added.
//! store.initialize()?;
//! # Ok::<(), rescope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! `rescope` is organized into a few key modules:
//!
//! - [`prelude`] - Convenient re-exports of commonly used types
//! - [`resources`] - Identifier model, registry, document parsing, loaders and the store
//! - [`xml`] - The owned element tree every document is parsed into
//! - [`diagnostics`] - Skipped-item reporting for lenient loads
//!
//! The loading pipeline walks each root's immediate subdirectories, splits each
//! directory name into base prefix and qualifier suffix, parses every matching
//! document once, and dispatches it to the loaders interested in that directory
//! family. Loaders run level by level so that string arrays see the fully loaded
//! string table and layout/menu loaders see every attribute definition.

#[macro_use]
pub(crate) mod error;
pub(crate) mod fs;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use rescope::prelude::*;
///
/// let registry = ResourceRegistry::new();
/// registry.register_text("app", "int color accent 0x7f050000")?;
/// assert_eq!(registry.len(), 1);
/// # Ok::<(), rescope::Error>(())
/// ```
pub mod prelude;

/// Resource model, registry, loaders and the merged store.
///
/// See [`resources`] for the full pipeline documentation. The most important
/// entry points are re-exported at the crate root: [`ResourceStore`],
/// [`ResourceStoreBuilder`], [`ResourceId`], [`ResourceName`],
/// [`ResourceKind`] and [`ResourceRegistry`].
pub mod resources;

/// `rescope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always
/// [`Error`]. Used consistently throughout the crate for all fallible operations.
pub type Result<T> = std::result::Result<T, Error>;

/// `rescope` Error type
///
/// The main error type for all operations in this crate. See [`error`](crate::Error)
/// variants for the taxonomy: malformed input is distinguished from registration
/// conflicts and from infrastructure failures.
pub use error::Error;

/// Filesystem abstraction: the [`Entry`] trait plus its in-memory and
/// memory-mapped disk implementations.
pub use fs::{Entry, EntryRc, FileData, Memory, Physical};

/// Diagnostics collection for lenient loads.
///
/// Re-exported from [`resources::diagnostics`].
pub use resources::diagnostics;

/// Owned XML element trees.
///
/// Re-exported from [`resources::xml`].
pub use resources::xml;

pub use resources::{
    Families, ResourceId, ResourceKind, ResourceName, ResourceRegistry, ResourceStore,
    ResourceStoreBuilder,
};
