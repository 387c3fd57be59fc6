//! On-disk layout of annotation containers.
//!
//! A node `N` is annotated by `parent(N)/.comments/basename(N).comment`.

use crate::error::{StoreError, StoreResult};
use crate::types::Target;
use std::ffi::{OsStr, OsString};
use std::path::{Component, Path, PathBuf};

/// Name of the hidden per-directory container.
pub const CONTAINER_DIR: &str = ".comments";

/// Suffix appended to a node's basename to name its annotation file.
pub const EXTENSION: &str = ".comment";

/// Container permission bits.
pub const CONTAINER_MODE: u32 = 0o755;

/// Annotation file permission bits.
pub const ANNOTATION_MODE: u32 = 0o644;

/// Where a node's annotation lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationLocation {
    /// Directory whose container holds the annotation.
    pub directory: PathBuf,
    /// Basename (or reserved token) the annotation is keyed by.
    pub key: OsString,
}

impl AnnotationLocation {
    /// Locate the annotation for `target`, resolving relative paths against `root`.
    pub fn for_target(root: &Path, target: &Target) -> StoreResult<Self> {
        if let Some(token) = target.token_key() {
            return Ok(Self {
                directory: root.to_path_buf(),
                key: OsString::from(token),
            });
        }

        let resolved = resolve(root, target.as_path());
        match (resolved.parent(), resolved.file_name()) {
            (Some(parent), Some(name)) => Ok(Self {
                directory: parent.to_path_buf(),
                key: name.to_os_string(),
            }),
            _ => Err(StoreError::invalid(
                target.as_path(),
                "path has no parent directory to hold its annotation",
            )),
        }
    }

    pub fn container(&self) -> PathBuf {
        container_path(&self.directory)
    }

    pub fn file(&self) -> PathBuf {
        self.container().join(annotation_file_name(&self.key))
    }

    pub fn key_lossy(&self) -> String {
        self.key.to_string_lossy().into_owned()
    }
}

pub fn container_path(directory: &Path) -> PathBuf {
    directory.join(CONTAINER_DIR)
}

/// `name` + `.comment`.
pub fn annotation_file_name(name: &OsStr) -> OsString {
    let mut file_name = name.to_os_string();
    file_name.push(EXTENSION);
    file_name
}

/// Inverse of [`annotation_file_name`]; `None` for anything that is not an annotation file.
pub fn key_from_file_name(file_name: &str) -> Option<&str> {
    file_name
        .strip_suffix(EXTENSION)
        .filter(|key| !key.is_empty())
}

/// Absolute, lexically normalized form of `path` relative to `root`.
///
/// `.` components are dropped and `..` pops the previous component without
/// consulting the filesystem, so `a/b/..` resolves to `a` even when `b` is a symlink.
pub fn resolve(root: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(name) => out.push(name),
        }
    }
    out
}
