//! Core data types for gi-cleaner

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Name of the version-control metadata directory that is never scanned
pub const VCS_DIR_NAME: &str = ".git";

/// Default name of the per-directory ignore file
pub const DEFAULT_IGNORE_FILE: &str = ".gitignore";

/// A `/`-separated path relative to a project root or an ignore file's scope.
///
/// The empty path denotes the root itself. Separators are always `/`,
/// whatever the host convention is.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelPath(String);

impl RelPath {
    /// The root path (no segments)
    pub fn root() -> Self {
        RelPath(String::new())
    }

    /// Build a relative path from `/`-separated text, dropping empty segments
    pub fn new(text: &str) -> Self {
        let joined = text
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .collect::<Vec<_>>()
            .join("/");
        RelPath(joined)
    }

    /// Build a relative path from a host path, resolving `.` and `..`
    /// lexically. Returns `None` when `..` climbs above the start.
    pub fn from_path(path: &Path) -> Option<Self> {
        let mut segments: Vec<String> = Vec::new();
        for component in path.components() {
            match component {
                Component::Normal(os) => segments.push(os.to_string_lossy().into_owned()),
                Component::ParentDir => {
                    segments.pop()?;
                }
                Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            }
        }
        Some(RelPath(segments.join("/")))
    }

    /// Whether this is the root path
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Path text with `/` separators
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the path segments
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// Number of segments (the root has depth 0)
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// Final segment, if any
    pub fn file_name(&self) -> Option<&str> {
        self.segments().last()
    }

    /// Append one segment
    pub fn join(&self, name: &str) -> Self {
        if self.is_root() {
            RelPath::new(name)
        } else {
            RelPath::new(&format!("{}/{}", self.0, name))
        }
    }

    /// Strip `prefix` segment-wise; `None` when `prefix` is not an ancestor (or self)
    pub fn strip_prefix(&self, prefix: &RelPath) -> Option<RelPath> {
        if prefix.is_root() {
            return Some(self.clone());
        }
        let mut own = self.segments();
        for expected in prefix.segments() {
            if own.next() != Some(expected) {
                return None;
            }
        }
        Some(RelPath(own.collect::<Vec<_>>().join("/")))
    }

    /// Convert back to a host path below `root`
    pub fn to_path(&self, root: &Path) -> PathBuf {
        self.segments().fold(root.to_path_buf(), |acc, s| acc.join(s))
    }
}

impl fmt::Display for RelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for RelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RelPath({:?})", self.0)
    }
}

impl From<&str> for RelPath {
    fn from(text: &str) -> Self {
        RelPath::new(text)
    }
}

impl Serialize for RelPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RelPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Ok(RelPath::new(&text))
    }
}

/// Kind of a scanned file-system entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    pub fn from_is_dir(is_dir: bool) -> Self {
        if is_dir {
            EntryKind::Directory
        } else {
            EntryKind::File
        }
    }

    pub fn is_dir(self) -> bool {
        self == EntryKind::Directory
    }
}
