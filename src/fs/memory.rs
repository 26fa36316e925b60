//! In-memory resource tree backend.
//!
//! [`Memory`] builds a virtual directory tree out of path strings and byte
//! buffers. It exists so that the loading pipeline and its tests can run
//! without touching a real filesystem, exactly mirroring the directory
//! contract of the physical backend (children sorted by name, files with
//! fully materialized contents).

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, Weak};

use super::{Entry, EntryRc, FileData};
use crate::{Error, Result};

/// An in-memory resource tree.
///
/// Paths are `/`-separated and relative to the tree root; intermediate
/// directories are created on demand.
///
/// # Examples
///
/// ```rust
/// use rescope::{Entry, Memory};
///
/// let fs = Memory::new();
/// fs.add_file("values/strings.xml", "<resources/>")?;
/// fs.add_file("values-en/strings.xml", "<resources/>")?;
///
/// let values = fs.entry("values").unwrap();
/// assert!(values.is_dir());
/// let file = fs.entry("values/strings.xml").unwrap();
/// assert_eq!(file.data()?.len(), 12);
/// # Ok::<(), rescope::Error>(())
/// ```
pub struct Memory {
    root: Arc<Node>,
}

struct Node {
    name: String,
    path: String,
    parent: Weak<Node>,
    kind: NodeKind,
}

enum NodeKind {
    Dir(RwLock<BTreeMap<String, Arc<Node>>>),
    File(Arc<[u8]>),
}

impl Memory {
    /// Creates a new empty tree.
    #[must_use]
    pub fn new() -> Memory {
        Memory {
            root: Arc::new(Node {
                name: String::new(),
                path: String::new(),
                parent: Weak::new(),
                kind: NodeKind::Dir(RwLock::new(BTreeMap::new())),
            }),
        }
    }

    /// Returns the root directory of the tree.
    #[must_use]
    pub fn root(&self) -> EntryRc {
        Arc::new(MemEntry(self.root.clone()))
    }

    /// Adds a file at `path`, creating intermediate directories as needed.
    ///
    /// An existing file at the same path is replaced.
    ///
    /// # Arguments
    ///
    /// * `path` - `/`-separated path relative to the root
    /// * `data` - The file contents
    ///
    /// # Errors
    ///
    /// Returns an error if the path is empty or if a path segment collides
    /// with an existing file.
    pub fn add_file(&self, path: &str, data: impl AsRef<[u8]>) -> Result<()> {
        let (dir, leaf) = self.make_dirs(path)?;
        let node = Arc::new(Node {
            name: leaf.clone(),
            path: join(&dir.path, &leaf),
            parent: Arc::downgrade(&dir),
            kind: NodeKind::File(Arc::from(data.as_ref())),
        });
        dir.insert(node)
    }

    /// Adds an empty directory at `path`, creating intermediate directories
    /// as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is empty or if a path segment collides
    /// with an existing file.
    pub fn add_dir(&self, path: &str) -> Result<()> {
        let (dir, leaf) = self.make_dirs(path)?;
        dir.child_dir(&leaf)?;
        Ok(())
    }

    /// Looks up an entry by path, returning `None` if it does not exist.
    #[must_use]
    pub fn entry(&self, path: &str) -> Option<EntryRc> {
        let mut current = self.root.clone();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            let next = match &current.kind {
                NodeKind::Dir(children) => children.read().ok()?.get(segment).cloned()?,
                NodeKind::File(_) => return None,
            };
            current = next;
        }
        Some(Arc::new(MemEntry(current)))
    }

    /// Walks to the parent directory of `path`, creating directories on the
    /// way, and returns it together with the leaf segment.
    fn make_dirs(&self, path: &str) -> Result<(Arc<Node>, String)> {
        let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let leaf = segments
            .pop()
            .ok_or_else(|| Error::Error(format!("empty path: '{path}'")))?;

        let mut current = self.root.clone();
        for segment in segments {
            current = current.child_dir(segment)?;
        }
        Ok((current, leaf.to_string()))
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Node {
    /// Returns the child directory `name`, creating it if absent.
    fn child_dir(self: &Arc<Node>, name: &str) -> Result<Arc<Node>> {
        let NodeKind::Dir(children) = &self.kind else {
            return Err(Error::Error(format!("not a directory: {}", self.path)));
        };

        let mut children = children.write().map_err(|_| Error::LockError)?;
        if let Some(existing) = children.get(name) {
            return match existing.kind {
                NodeKind::Dir(_) => Ok(existing.clone()),
                NodeKind::File(_) => Err(Error::Error(format!(
                    "not a directory: {}",
                    existing.path
                ))),
            };
        }

        let node = Arc::new(Node {
            name: name.to_string(),
            path: join(&self.path, name),
            parent: Arc::downgrade(self),
            kind: NodeKind::Dir(RwLock::new(BTreeMap::new())),
        });
        children.insert(name.to_string(), node.clone());
        Ok(node)
    }

    /// Inserts `node` as a child, replacing any existing entry of the same
    /// name.
    fn insert(&self, node: Arc<Node>) -> Result<()> {
        let NodeKind::Dir(children) = &self.kind else {
            return Err(Error::Error(format!("not a directory: {}", self.path)));
        };

        let mut children = children.write().map_err(|_| Error::LockError)?;
        children.insert(node.name.clone(), node);
        Ok(())
    }
}

fn join(base: &str, name: &str) -> String {
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{base}/{name}")
    }
}

struct MemEntry(Arc<Node>);

impl Entry for MemEntry {
    fn name(&self) -> &str {
        &self.0.name
    }

    fn path(&self) -> String {
        self.0.path.clone()
    }

    fn is_dir(&self) -> bool {
        matches!(self.0.kind, NodeKind::Dir(_))
    }

    fn parent(&self) -> Option<EntryRc> {
        self.0
            .parent
            .upgrade()
            .map(|node| Arc::new(MemEntry(node)) as EntryRc)
    }

    fn children(&self) -> Result<Vec<EntryRc>> {
        match &self.0.kind {
            NodeKind::Dir(children) => {
                let children = children.read().map_err(|_| Error::LockError)?;
                Ok(children
                    .values()
                    .map(|node| Arc::new(MemEntry(node.clone())) as EntryRc)
                    .collect())
            }
            NodeKind::File(_) => Ok(Vec::new()),
        }
    }

    fn data(&self) -> Result<FileData> {
        match &self.0.kind {
            NodeKind::Dir(_) => Err(Error::Error(format!("not a file: {}", self.0.path))),
            NodeKind::File(data) => Ok(FileData::shared(data.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_nested_tree() {
        let fs = Memory::new();
        fs.add_file("values/strings.xml", b"abc").unwrap();
        fs.add_file("values/colors.xml", b"def").unwrap();
        fs.add_file("layout-land/main.xml", b"ghi").unwrap();

        let root = fs.root();
        let children = root.children().unwrap();
        let names: Vec<&str> = children.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["layout-land", "values"]);

        let values = fs.entry("values").unwrap();
        assert!(values.is_dir());
        let files = values.children().unwrap();
        let names: Vec<&str> = files.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["colors.xml", "strings.xml"]);
    }

    #[test]
    fn file_data_roundtrip() {
        let fs = Memory::new();
        fs.add_file("raw/blob.bin", [0xCC_u8; 16]).unwrap();

        let file = fs.entry("raw/blob.bin").unwrap();
        assert!(!file.is_dir());
        assert_eq!(&*file.data().unwrap(), &[0xCC_u8; 16]);
        assert_eq!(file.path(), "raw/blob.bin");
    }

    #[test]
    fn parent_walks_up() {
        let fs = Memory::new();
        fs.add_file("values-en/strings.xml", b"x").unwrap();

        let file = fs.entry("values-en/strings.xml").unwrap();
        let parent = file.parent().unwrap();
        assert_eq!(parent.name(), "values-en");
        let grandparent = parent.parent().unwrap();
        assert_eq!(grandparent.name(), "");
        assert!(grandparent.parent().is_none());
    }

    #[test]
    fn replaces_existing_file() {
        let fs = Memory::new();
        fs.add_file("values/strings.xml", b"one").unwrap();
        fs.add_file("values/strings.xml", b"two").unwrap();

        let file = fs.entry("values/strings.xml").unwrap();
        assert_eq!(&*file.data().unwrap(), b"two");
    }

    #[test]
    fn rejects_file_as_directory() {
        let fs = Memory::new();
        fs.add_file("values", b"not a dir").unwrap();
        assert!(fs.add_file("values/strings.xml", b"x").is_err());
    }

    #[test]
    fn missing_entry_is_none() {
        let fs = Memory::new();
        assert!(fs.entry("nope").is_none());
        assert!(fs.entry("nope/deeper").is_none());
    }
}
