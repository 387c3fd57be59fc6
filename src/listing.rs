//! Directory listings with inherited `.` and `..` comments.

use crate::error::{StoreError, StoreResult};
use crate::store::CommentStore;
use crate::types::{CommentMap, CURRENT_DIR_KEY, PARENT_DIR_KEY};
use std::path::{Path, PathBuf};

/// Entries of one directory and the comments to show beside them.
#[derive(Debug, Clone)]
pub struct Listing {
    pub directory: PathBuf,
    pub entries: Vec<String>,
    pub comments: CommentMap,
}

#[derive(Debug, Clone, Copy)]
pub struct ListingOptions {
    /// Put `.` and `..` ahead of the real entries.
    pub include_dot_entries: bool,
    /// Sort real entries by name; enumeration order otherwise.
    pub sort: bool,
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self {
            include_dot_entries: true,
            sort: true,
        }
    }
}

impl Listing {
    /// Load `dir`'s entries and comments.
    ///
    /// `.` resolves to the directory's own `.` annotation, then to what its
    /// parent records about it, then to the grandparent-level entry. `..`
    /// follows the same chain one level up, starting from its own `..`
    /// annotation.
    pub fn load(store: &CommentStore, dir: &Path, options: ListingOptions) -> StoreResult<Self> {
        let directory = store.absolute(dir);
        if !directory.is_dir() {
            return Err(StoreError::invalid(dir, "not a directory"));
        }

        let mut entries = store.list_entries(&directory)?;
        if options.sort {
            entries.sort();
        }

        let mut comments = store.load_comments(&directory)?;

        if !comments.contains(CURRENT_DIR_KEY) {
            if let Some(comment) = inherited_comment(store, &directory)? {
                comments.insert(CURRENT_DIR_KEY, comment);
            }
        }

        if !comments.contains(PARENT_DIR_KEY) {
            if let Some(parent) = directory.parent() {
                if let Some(comment) = inherited_comment(store, parent)? {
                    comments.insert(PARENT_DIR_KEY, comment);
                }
            }
        }

        if options.include_dot_entries {
            let mut with_dots = vec![CURRENT_DIR_KEY.to_string(), PARENT_DIR_KEY.to_string()];
            with_dots.append(&mut entries);
            entries = with_dots;
        }

        tracing::debug!(
            directory = %directory.display(),
            entries = entries.len(),
            comments = comments.len(),
            "Loaded listing"
        );

        Ok(Self {
            directory,
            entries,
            comments,
        })
    }
}

/// What the parent, or failing that the grandparent, records about `dir`.
fn inherited_comment(store: &CommentStore, dir: &Path) -> StoreResult<Option<String>> {
    match store.parent_comment(dir)? {
        Some(comment) => Ok(Some(comment)),
        None => store.grandparent_comment(dir),
    }
}
