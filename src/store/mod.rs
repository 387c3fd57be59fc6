//! Annotation Store
//!
//! Owns the hidden `.comments` container format: existence checks, creation,
//! listing, reading, writing and deletion of annotations, plus the
//! parent/grandparent lookups used for directory self-comments.
//!
//! Every operation is a single synchronous attempt. The store never prints;
//! callers decide what the user sees.

pub mod gc;
pub mod layout;

use crate::error::{StoreError, StoreResult};
use crate::types::{CommentMap, ContainerState, DeleteOutcome, Target, WriteMode};
use layout::{ANNOTATION_MODE, CONTAINER_MODE};
use std::ffi::OsStr;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

pub use gc::{GcOptions, GcReport};
pub use layout::{AnnotationLocation, CONTAINER_DIR, EXTENSION};

/// Sidecar annotation store rooted at a working directory.
///
/// Relative paths handed to any operation are resolved against `root`.
#[derive(Debug, Clone)]
pub struct CommentStore {
    root: PathBuf,
    write_mode: WriteMode,
}

impl CommentStore {
    /// Open a store rooted at `root`, which must be an existing directory.
    pub fn open(root: impl AsRef<Path>) -> StoreResult<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(StoreError::invalid(root, "working directory does not exist"));
        }
        let root = dunce::canonicalize(root).map_err(|e| StoreError::io(root, e))?;
        Ok(Self {
            root,
            write_mode: WriteMode::default(),
        })
    }

    /// Open a store rooted at the process working directory.
    pub fn current_dir() -> StoreResult<Self> {
        let cwd = std::env::current_dir().map_err(|e| StoreError::io(".", e))?;
        Self::open(cwd)
    }

    pub fn with_write_mode(mut self, write_mode: WriteMode) -> Self {
        self.write_mode = write_mode;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn write_mode(&self) -> WriteMode {
        self.write_mode
    }

    pub(crate) fn absolute(&self, path: &Path) -> PathBuf {
        layout::resolve(&self.root, path)
    }

    /// Where `target`'s annotation lives.
    pub fn locate(&self, target: &Target) -> StoreResult<AnnotationLocation> {
        AnnotationLocation::for_target(&self.root, target)
    }

    /// True iff `<dir>/.comments` exists and is a directory.
    pub fn container_exists(&self, dir: impl AsRef<Path>) -> bool {
        layout::container_path(&self.absolute(dir.as_ref())).is_dir()
    }

    /// Create `<dir>/.comments`.
    ///
    /// An existing container directory counts as success so two writers racing
    /// to annotate siblings never fail each other. A non-directory squatting on
    /// the name is an error and is left in place.
    pub fn create_container(&self, dir: impl AsRef<Path>) -> StoreResult<ContainerState> {
        let container = layout::container_path(&self.absolute(dir.as_ref()));

        let mut builder = fs::DirBuilder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(CONTAINER_MODE);
        }

        match builder.create(&container) {
            Ok(()) => {
                tracing::info!(container = %container.display(), "Created annotation container");
                Ok(ContainerState::Created)
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists && container.is_dir() => {
                tracing::debug!(container = %container.display(), "Annotation container already exists");
                Ok(ContainerState::AlreadyExists)
            }
            Err(e) => Err(StoreError::io(&container, e)),
        }
    }

    /// Every entry of `dir` except the container itself, in enumeration order.
    pub fn list_entries(&self, dir: impl AsRef<Path>) -> StoreResult<Vec<String>> {
        let dir = self.absolute(dir.as_ref());
        if !dir.is_dir() {
            return Err(StoreError::invalid(&dir, "not a directory"));
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&dir).map_err(|e| StoreError::io(&dir, e))? {
            let entry = entry.map_err(|e| StoreError::io(&dir, e))?;
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    tracing::warn!("Entry name in {} is not UTF-8: {:?}", dir.display(), raw);
                    raw.to_string_lossy().into_owned()
                }
            };
            if name != CONTAINER_DIR {
                names.push(name);
            }
        }
        Ok(names)
    }

    /// All annotations in `dir`'s container, keyed by node basename.
    ///
    /// Values are raw file contents, trailing newline included. A missing
    /// container yields an empty map. Annotations that cannot be read are
    /// logged and left out.
    pub fn load_comments(&self, dir: impl AsRef<Path>) -> StoreResult<CommentMap> {
        let container = layout::container_path(&self.absolute(dir.as_ref()));
        let mut comments = CommentMap::new();
        if !container.is_dir() {
            return Ok(comments);
        }

        for entry in fs::read_dir(&container).map_err(|e| StoreError::io(&container, e))? {
            let entry = entry.map_err(|e| StoreError::io(&container, e))?;
            let path = entry.path();
            if path.is_dir() {
                tracing::warn!("Skipping directory inside container: {}", path.display());
                continue;
            }

            let file_name = entry.file_name();
            let key = match file_name.to_str().and_then(layout::key_from_file_name) {
                Some(key) => key.to_string(),
                None => {
                    tracing::debug!("Ignoring non-annotation file {}", path.display());
                    continue;
                }
            };

            match read_lossy(&path) {
                Ok(comment) => {
                    comments.insert(key, comment);
                }
                Err(e) => tracing::warn!("Skipping unreadable annotation: {}", e),
            }
        }
        Ok(comments)
    }

    /// The raw annotation for `target`, if any.
    pub fn comment(&self, target: &Target) -> StoreResult<Option<String>> {
        let location = self.locate(target)?;
        read_annotation(&location.directory, &location.key)
    }

    /// Write `comment` as `target`'s annotation, creating the container if needed.
    pub fn set_comment(&self, target: &Target, comment: &str) -> StoreResult<()> {
        let node = self.root.join(target.as_path());
        if !node.exists() {
            return Err(StoreError::invalid(target.as_path(), "path does not exist"));
        }

        let location = self.locate(target)?;
        if !self.container_exists(&location.directory) {
            self.create_container(&location.directory)?;
        }

        let file = location.file();
        let mut options = fs::OpenOptions::new();
        options.create(true);
        match self.write_mode {
            WriteMode::Overwrite => options.write(true).truncate(true),
            WriteMode::Append => options.append(true),
        };
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(ANNOTATION_MODE);
        }

        let mut handle = options.open(&file).map_err(|e| StoreError::io(&file, e))?;
        handle
            .write_all(format!("{}\n", comment).as_bytes())
            .map_err(|e| StoreError::io(&file, e))?;

        tracing::debug!(
            file = %file.display(),
            mode = ?self.write_mode,
            "Wrote annotation"
        );
        Ok(())
    }

    /// Remove `target`'s annotation, and its container once nothing is left in it.
    ///
    /// A missing container or annotation is `NotFound`, not an error, and
    /// leaves the filesystem untouched.
    pub fn delete_comment(&self, target: &Target) -> StoreResult<DeleteOutcome> {
        let location = self.locate(target)?;
        let container = location.container();
        if !container.is_dir() {
            return Ok(DeleteOutcome::NotFound);
        }

        let file = location.file();
        if !file.is_file() {
            return Ok(DeleteOutcome::NotFound);
        }

        fs::remove_file(&file).map_err(|e| StoreError::io(&file, e))?;
        tracing::debug!(file = %file.display(), "Removed annotation");

        remove_container_if_empty(&container)?;
        Ok(DeleteOutcome::Deleted)
    }

    /// `dir`'s annotation as recorded in its parent's container, prefixed `[Parent] `.
    pub fn parent_comment(&self, dir: impl AsRef<Path>) -> StoreResult<Option<String>> {
        let dir = self.absolute(dir.as_ref());
        let (Some(parent), Some(name)) = (dir.parent(), dir.file_name()) else {
            return Ok(None);
        };
        Ok(read_annotation(parent, name)?.map(|c| format!("[Parent] {}", c)))
    }

    /// The annotation on `dir`'s parent as recorded in the grandparent's
    /// container, prefixed `[Grandparent] `.
    pub fn grandparent_comment(&self, dir: impl AsRef<Path>) -> StoreResult<Option<String>> {
        let dir = self.absolute(dir.as_ref());
        let Some(parent) = dir.parent() else {
            return Ok(None);
        };
        let (Some(grandparent), Some(name)) = (parent.parent(), parent.file_name()) else {
            return Ok(None);
        };
        Ok(read_annotation(grandparent, name)?.map(|c| format!("[Grandparent] {}", c)))
    }
}

fn read_lossy(path: &Path) -> StoreResult<String> {
    let bytes = fs::read(path).map_err(|e| StoreError::io(path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read the annotation keyed `key` from `directory`'s container.
fn read_annotation(directory: &Path, key: &OsStr) -> StoreResult<Option<String>> {
    let file = layout::container_path(directory).join(layout::annotation_file_name(key));
    if !file.is_file() {
        return Ok(None);
    }
    read_lossy(&file).map(Some)
}

/// Remove `container` if it holds nothing. Returns whether it was removed.
pub(crate) fn remove_container_if_empty(container: &Path) -> StoreResult<bool> {
    let mut entries = fs::read_dir(container).map_err(|e| StoreError::io(container, e))?;
    if entries.next().is_some() {
        return Ok(false);
    }
    fs::remove_dir(container).map_err(|e| StoreError::io(container, e))?;
    tracing::info!(container = %container.display(), "Removed empty annotation container");
    Ok(true)
}
