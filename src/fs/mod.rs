//! Filesystem abstraction for resource tree access.
//!
//! The resolution core never touches the real filesystem directly. Every
//! directory walk and file read goes through the [`Entry`] trait, so tests can
//! substitute fully in-memory trees and production code can use memory-mapped
//! disk access.
//!
//! # Key Components
//!
//! - [`Entry`] - A node in a resource tree (directory or file)
//! - [`FileData`] - Byte contents of a file, mapped or in-memory
//! - [`Memory`] - In-memory tree implementation for tests
//! - [`Physical`] - Disk-backed implementation using memory-mapped I/O
//!
//! # Contract
//!
//! [`Entry::children`] returns entries sorted by name. Load passes rely on
//! this to make repeated loads byte-identical.
//!
//! # Example
//!
//! ```rust
//! use rescope::{Entry, Memory};
//!
//! let fs = Memory::new();
//! fs.add_file("values/strings.xml", "<resources/>")?;
//!
//! let root = fs.root();
//! let children = root.children()?;
//! assert_eq!(children.len(), 1);
//! assert_eq!(children[0].name(), "values");
//! assert!(children[0].is_dir());
//! # Ok::<(), rescope::Error>(())
//! ```

mod memory;
mod physical;

pub use memory::Memory;
pub use physical::Physical;

use std::ops::Deref;
use std::sync::Arc;

use memmap2::Mmap;

use crate::Result;

/// A reference-counted handle to a node in a resource tree.
pub type EntryRc = Arc<dyn Entry>;

/// A node in a resource tree, either a directory or a file.
///
/// Implementations must be cheap to clone through [`EntryRc`] and safe to
/// share across the parallel loader threads.
pub trait Entry: Send + Sync {
    /// Returns the last path segment of this entry.
    fn name(&self) -> &str;

    /// Returns the full path of this entry, for display and diagnostics.
    fn path(&self) -> String;

    /// Returns true if this entry is a directory.
    fn is_dir(&self) -> bool;

    /// Returns the parent directory, or `None` at the tree root.
    fn parent(&self) -> Option<EntryRc>;

    /// Returns the immediate children of this entry, sorted by name.
    ///
    /// A file has no children and returns an empty vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying directory cannot be listed.
    fn children(&self) -> Result<Vec<EntryRc>>;

    /// Returns the byte contents of this entry.
    ///
    /// The returned [`FileData`] is fully materialized; there is no partially
    /// consumed stream to release afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if this entry is a directory or cannot be read.
    fn data(&self) -> Result<FileData>;
}

/// Byte contents of a file, backed either by a memory mapping or by a shared
/// in-memory buffer.
///
/// Dereferences to `&[u8]` so callers never need to know which backing is in
/// use.
#[derive(Debug)]
pub struct FileData(Repr);

#[derive(Debug)]
enum Repr {
    Mapped(Mmap),
    Shared(Arc<[u8]>),
}

impl FileData {
    /// Wraps a memory mapping produced by the physical backend.
    pub(crate) fn mapped(map: Mmap) -> FileData {
        FileData(Repr::Mapped(map))
    }

    /// Wraps a shared in-memory buffer.
    pub(crate) fn shared(data: Arc<[u8]>) -> FileData {
        FileData(Repr::Shared(data))
    }

    /// Returns the length of the contents in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns true if the contents are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    fn as_slice(&self) -> &[u8] {
        match &self.0 {
            Repr::Mapped(map) => map,
            Repr::Shared(data) => data,
        }
    }
}

impl Deref for FileData {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl AsRef<[u8]> for FileData {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_data_shared() {
        let data = FileData::shared(Arc::from(&b"hello"[..]));
        assert_eq!(data.len(), 5);
        assert!(!data.is_empty());
        assert_eq!(&*data, b"hello");
        assert_eq!(data.as_ref(), b"hello");
    }

    #[test]
    fn file_data_empty() {
        let data = FileData::shared(Arc::from(&b""[..]));
        assert_eq!(data.len(), 0);
        assert!(data.is_empty());
    }
}
