//! Core types shared by the store, listing, and presentation layers.

use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Reserved key for a directory's own comment.
pub const CURRENT_DIR_KEY: &str = ".";

/// Reserved key for the comment on a directory's parent.
pub const PARENT_DIR_KEY: &str = "..";

/// A node named on the command line.
///
/// The bare tokens `.`, `./`, `..` and `../` are kept as tokens: their
/// annotation is stored under the literal key (`.` or `..`) in the container of
/// the directory they are relative to, never under the resolved directory name.
/// Every other path is resolved and keyed by its real basename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    RealPath(PathBuf),
    CurrentDirToken,
    ParentDirToken,
}

impl Target {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let raw = path.as_os_str();
        if raw == OsStr::new(".") || raw == OsStr::new("./") {
            Target::CurrentDirToken
        } else if raw == OsStr::new("..") || raw == OsStr::new("../") {
            Target::ParentDirToken
        } else {
            Target::RealPath(path.to_path_buf())
        }
    }

    /// The verbatim key for token targets, `None` for real paths.
    pub fn token_key(&self) -> Option<&'static str> {
        match self {
            Target::RealPath(_) => None,
            Target::CurrentDirToken => Some(CURRENT_DIR_KEY),
            Target::ParentDirToken => Some(PARENT_DIR_KEY),
        }
    }

    /// The path this target denotes, relative to the working directory when not absolute.
    pub fn as_path(&self) -> &Path {
        match self {
            Target::RealPath(p) => p,
            Target::CurrentDirToken => Path::new("."),
            Target::ParentDirToken => Path::new(".."),
        }
    }
}

impl From<&str> for Target {
    fn from(value: &str) -> Self {
        Target::new(value)
    }
}

impl From<&Path> for Target {
    fn from(value: &Path) -> Self {
        Target::new(value)
    }
}

impl From<PathBuf> for Target {
    fn from(value: PathBuf) -> Self {
        Target::new(value)
    }
}

/// Entry name to raw comment text, as loaded from one container.
///
/// An absent key means "no annotation"; an empty string is a real (empty)
/// annotation and does not trigger inheritance fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentMap {
    entries: BTreeMap<String, String>,
}

impl CommentMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, comment: impl Into<String>) -> Option<String> {
        self.entries.insert(name.into(), comment.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.entries.remove(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.entries.iter()
    }
}

impl FromIterator<(String, String)> for CommentMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Outcome of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// Result of asking for a container to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerState {
    Created,
    AlreadyExists,
}

/// How `set` writes an annotation file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Truncate and write: one record per node.
    #[default]
    Overwrite,
    /// Append a newline-terminated record to whatever is there.
    Append,
}
