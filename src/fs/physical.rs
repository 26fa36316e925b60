//! Disk-backed resource tree using memory-mapped file reads.
//!
//! [`Physical`] adapts a real directory to the [`Entry`] contract. Directory
//! listings come from `std::fs` and are sorted by name so that load passes
//! are deterministic; file contents are memory-mapped, which avoids read
//! loops for large raw resources while keeping small XML documents cheap.
//!
//! A path that does not exist is a valid entry: it reports `is_dir() ==
//! false` and has no children, which lets callers treat an absent resource
//! root as a silent no-op.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use memmap2::Mmap;

use super::{Entry, EntryRc, FileData};
use crate::Result;

/// A node of a disk-backed resource tree.
pub struct Physical {
    path: PathBuf,
    name: String,
}

impl Physical {
    /// Opens a tree rooted at `path`.
    ///
    /// The path is not required to exist; a missing root simply has no
    /// children.
    pub fn open(path: impl AsRef<Path>) -> EntryRc {
        Arc::new(Physical::node(path.as_ref().to_path_buf()))
    }

    fn node(path: PathBuf) -> Physical {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Physical { path, name }
    }
}

impl Entry for Physical {
    fn name(&self) -> &str {
        &self.name
    }

    fn path(&self) -> String {
        self.path.display().to_string()
    }

    fn is_dir(&self) -> bool {
        self.path.is_dir()
    }

    fn parent(&self) -> Option<EntryRc> {
        self.path
            .parent()
            .map(|p| Arc::new(Physical::node(p.to_path_buf())) as EntryRc)
    }

    fn children(&self) -> Result<Vec<EntryRc>> {
        if !self.path.is_dir() {
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        for dir_entry in fs::read_dir(&self.path)? {
            paths.push(dir_entry?.path());
        }
        paths.sort();

        Ok(paths
            .into_iter()
            .map(|p| Arc::new(Physical::node(p)) as EntryRc)
            .collect())
    }

    fn data(&self) -> Result<FileData> {
        let file = fs::File::open(&self.path)?;
        if file.metadata()?.len() == 0 {
            // Mapping a zero-length file fails on several platforms.
            return Ok(FileData::shared(Arc::from(&[][..])));
        }

        // SAFETY: the mapping is read-only and fully owned by the returned
        // FileData; concurrent truncation of the underlying file is outside
        // this crate's contract, matching the usual mmap caveat.
        let map = unsafe { Mmap::map(&file)? };
        Ok(FileData::mapped(map))
    }
}
