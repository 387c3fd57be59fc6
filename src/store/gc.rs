//! Garbage collection of orphaned annotations and empty containers.

use super::layout::{self, CONTAINER_DIR};
use super::{remove_container_if_empty, CommentStore};
use crate::error::{StoreError, StoreResult};
use crate::types::{CURRENT_DIR_KEY, PARENT_DIR_KEY};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, Default)]
pub struct GcOptions {
    /// Walk subdirectories as well.
    pub recursive: bool,
    /// Report what would be removed without touching the filesystem.
    pub dry_run: bool,
}

/// What a collection pass removed (or would remove, on a dry run).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GcReport {
    pub orphans: Vec<PathBuf>,
    pub containers: Vec<PathBuf>,
}

impl GcReport {
    pub fn is_empty(&self) -> bool {
        self.orphans.is_empty() && self.containers.is_empty()
    }
}

impl CommentStore {
    /// Remove annotations whose node no longer exists, then any container left empty.
    ///
    /// `.` and `..` annotations are never orphans. Containers are never descended into.
    pub fn collect_garbage(&self, dir: impl AsRef<Path>, options: GcOptions) -> StoreResult<GcReport> {
        let dir = self.absolute(dir.as_ref());
        if !dir.is_dir() {
            return Err(StoreError::invalid(&dir, "not a directory"));
        }

        let mut report = GcReport::default();
        if !options.recursive {
            collect_in(&dir, options.dry_run, &mut report)?;
            return Ok(report);
        }

        let walker = WalkDir::new(&dir)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| entry.file_name() != CONTAINER_DIR);
        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.clone());
                let source = e.into_io_error().unwrap_or_else(|| {
                    std::io::Error::new(std::io::ErrorKind::Other, "filesystem loop detected")
                });
                StoreError::io(path, source)
            })?;
            if entry.file_type().is_dir() {
                collect_in(entry.path(), options.dry_run, &mut report)?;
            }
        }
        Ok(report)
    }
}

fn collect_in(dir: &Path, dry_run: bool, report: &mut GcReport) -> StoreResult<()> {
    let container = layout::container_path(dir);
    if !container.is_dir() {
        return Ok(());
    }

    let mut remaining = 0usize;
    for entry in fs::read_dir(&container).map_err(|e| StoreError::io(&container, e))? {
        let entry = entry.map_err(|e| StoreError::io(&container, e))?;
        let file_name = entry.file_name();
        let key = match file_name.to_str().and_then(layout::key_from_file_name) {
            Some(key) if key != CURRENT_DIR_KEY && key != PARENT_DIR_KEY => key,
            _ => {
                remaining += 1;
                continue;
            }
        };

        // symlink_metadata so a dangling link still counts as a node
        if fs::symlink_metadata(dir.join(key)).is_ok() {
            remaining += 1;
            continue;
        }

        let path = entry.path();
        if !dry_run {
            fs::remove_file(&path).map_err(|e| StoreError::io(&path, e))?;
        }
        tracing::info!(annotation = %path.display(), dry_run, "Removed orphaned annotation");
        report.orphans.push(path);
    }

    if dry_run {
        if remaining == 0 {
            report.containers.push(container);
        }
    } else if remove_container_if_empty(&container)? {
        report.containers.push(container);
    }
    Ok(())
}
