//! Optional path normalization applied before a path reaches the store.
//!
//! On case-insensitive filesystems `Notes.TXT` and `notes.txt` name the same
//! node, but their annotation files would not. [`TrueCase`] rewrites each path
//! component to the spelling found on disk so both land on one annotation.

use crate::store::layout;
use crate::types::Target;
use std::ffi::OsStr;
use std::fs;
use std::path::{Component, Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Rewrites a user-supplied path before it is located in the store.
pub trait PathNormalizer: Send + Sync {
    fn normalize(&self, root: &Path, path: &Path) -> PathBuf;
}

/// Leaves paths untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl PathNormalizer for Verbatim {
    fn normalize(&self, _root: &Path, path: &Path) -> PathBuf {
        path.to_path_buf()
    }
}

/// Matches each component to its on-disk casing.
///
/// Comparison is Unicode NFC plus lowercase, so decomposed names reported by
/// some filesystems still match. An exact spelling always wins over a folded
/// one. Components with no match are kept as typed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrueCase;

impl PathNormalizer for TrueCase {
    fn normalize(&self, root: &Path, path: &Path) -> PathBuf {
        let resolved = layout::resolve(root, path);
        let mut out = PathBuf::new();
        for component in resolved.components() {
            match component {
                Component::Normal(name) => {
                    let matched = on_disk_name(&out, name);
                    out.push(matched.as_deref().unwrap_or(name));
                }
                other => out.push(other.as_os_str()),
            }
        }
        out
    }
}

fn fold(name: &str) -> String {
    name.nfc().collect::<String>().to_lowercase()
}

fn on_disk_name(dir: &Path, name: &OsStr) -> Option<std::ffi::OsString> {
    let wanted = name.to_str()?;
    let entries = fs::read_dir(dir).ok()?;

    let folded = fold(wanted);
    let mut candidate = None;
    for entry in entries.flatten() {
        let entry_name = entry.file_name();
        if entry_name == name {
            return Some(entry_name);
        }
        if candidate.is_none() {
            if let Some(s) = entry_name.to_str() {
                if fold(s) == folded {
                    candidate = Some(entry_name);
                }
            }
        }
    }
    if let Some(found) = &candidate {
        tracing::debug!("Normalized path component {:?} to {:?}", name, found);
    }
    candidate
}

/// Build a store target from a raw argument, normalizing real paths only.
pub fn normalize_target(normalizer: &dyn PathNormalizer, root: &Path, raw: &Path) -> Target {
    match Target::new(raw) {
        Target::RealPath(path) => Target::RealPath(normalizer.normalize(root, &path)),
        token => token,
    }
}
