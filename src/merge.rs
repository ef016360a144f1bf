//! Merge ordering for discovered config files.
//!
//! Files are visited in a strict total order, and the merge pass is
//! last-write-wins, so position decides precedence:
//!
//! 1. **Layer**: the index of the search path that contributed the file.
//!    Lower layers are visited first, so files from later search paths win.
//! 2. **Within a layer**: longer absolute paths first, ties broken by
//!    reverse lexicographic order. Longer names encode deeper namespaces
//!    (`rhn_taskomatic_daemon.conf` before `rhn_taskomatic.conf` before
//!    `rhn.conf`), so the root file is read last in its layer.
//!
//! A path is a member at most once. Re-adding a known path is a no-op and
//! the file keeps the slot of its first registration.

use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

/// Sort key for two paths in the same layer: `(-length, reverse-lex)` over
/// the raw path bytes, so distinct paths never compare equal.
pub fn merge_key(path: &Path) -> (Reverse<usize>, Reverse<&[u8]>) {
    let bytes = path.as_os_str().as_encoded_bytes();
    (Reverse(bytes.len()), Reverse(bytes))
}

/// Compare two paths of the same layer by [`merge_key`].
pub fn merge_order(a: impl AsRef<Path>, b: impl AsRef<Path>) -> Ordering {
    merge_key(a.as_ref()).cmp(&merge_key(b.as_ref()))
}

/// An absolute file path tagged with the layer it was discovered in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub layer: usize,
    pub path: PathBuf,
    display: String,
}

impl FileEntry {
    pub fn new(layer: usize, path: PathBuf) -> Self {
        let display = path.to_string_lossy().into_owned();
        Self {
            layer,
            path,
            display,
        }
    }

    /// The path for logs and output. Not used for ordering.
    pub fn as_str(&self) -> &str {
        &self.display
    }
}

impl Ord for FileEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.layer
            .cmp(&other.layer)
            .then_with(|| merge_order(&self.path, &other.path))
    }
}

impl PartialOrd for FileEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The ordered set of files a merge pass visits.
#[derive(Debug, Clone, Default)]
pub struct FileSet {
    entries: BTreeSet<FileEntry>,
    members: HashSet<PathBuf>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `path` into `layer`. Returns `false` if the path is already a
    /// member (in any layer).
    pub fn insert(&mut self, layer: usize, path: PathBuf) -> bool {
        if !self.members.insert(path.clone()) {
            return false;
        }
        let inserted = self.entries.insert(FileEntry::new(layer, path));
        debug_assert!(inserted, "merge order collapsed two distinct paths");
        inserted
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.members.contains(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in merge order.
    pub fn iter(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.iter()
    }
}
