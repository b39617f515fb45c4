//! Watched template directories.

use crate::desktop::DESKTOP_SUFFIX;
use crate::registry::entry::EntryId;
use serde::Serialize;
use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Index of a directory in the registry's priority order.
///
/// Larger ids are more relevant: their contributions override those of
/// smaller ids.
pub type DirId = usize;

/// A directory to watch for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySpec {
    pub path: PathBuf,
    /// Directory belongs to the user rather than the system.
    pub user_dir: bool,
}

impl DirectorySpec {
    pub fn system(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            user_dir: false,
        }
    }

    pub fn user(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            user_dir: true,
        }
    }
}

/// Population state of a watched directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectoryState {
    /// Not listed yet.
    Uninitialized,
    /// Initial listing in flight.
    Listing,
    /// Initial listing applied; only live changes from here on.
    Ready,
}

/// Snapshot of a watched directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryInfo {
    pub id: DirId,
    pub path: PathBuf,
    pub user_dir: bool,
    pub state: DirectoryState,
    /// Number of tracked template files.
    pub entries: usize,
}

/// A file found by listing a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedFile {
    pub basename: OsString,
    pub is_desktop_entry: bool,
}

impl ListedFile {
    pub fn new(basename: impl Into<OsString>) -> Self {
        let basename = basename.into();
        let is_desktop_entry = is_desktop_entry_name(&basename);
        Self {
            basename,
            is_desktop_entry,
        }
    }
}

/// Kind of a filesystem change inside a watched directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Deleted,
    /// File content changed.
    Modified,
    /// Renamed in or out of the directory, direction unknown. The file's
    /// presence when the change is applied decides.
    Renamed,
    /// Attribute changes, moves, unmounts and anything else.
    Other,
}

/// A change notification for one file of a watched directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryChange {
    pub kind: ChangeKind,
    pub path: PathBuf,
}

impl DirectoryChange {
    pub fn new(kind: ChangeKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }

    pub fn created(path: impl Into<PathBuf>) -> Self {
        Self::new(ChangeKind::Created, path)
    }

    pub fn deleted(path: impl Into<PathBuf>) -> Self {
        Self::new(ChangeKind::Deleted, path)
    }

    pub fn modified(path: impl Into<PathBuf>) -> Self {
        Self::new(ChangeKind::Modified, path)
    }

    pub fn renamed(path: impl Into<PathBuf>) -> Self {
        Self::new(ChangeKind::Renamed, path)
    }
}

/// Whether a file name marks a desktop entry.
pub fn is_desktop_entry_name(basename: &OsStr) -> bool {
    basename.to_string_lossy().ends_with(DESKTOP_SUFFIX)
}

/// List the candidate files of a directory.
pub fn list_directory(path: &Path) -> io::Result<Vec<ListedFile>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(path)? {
        files.push(ListedFile::new(entry?.file_name()));
    }
    Ok(files)
}

/// A watched directory and the template files tracked in it.
#[derive(Debug)]
pub(crate) struct TemplateDirectory {
    pub(crate) path: PathBuf,
    pub(crate) user_dir: bool,
    pub(crate) state: DirectoryState,
    files: HashMap<OsString, EntryId>,
}

impl TemplateDirectory {
    pub(crate) fn new(spec: DirectorySpec) -> Self {
        Self {
            path: spec.path,
            user_dir: spec.user_dir,
            state: DirectoryState::Uninitialized,
            files: HashMap::new(),
        }
    }

    pub(crate) fn find(&self, basename: &OsStr) -> Option<EntryId> {
        self.files.get(basename).copied()
    }

    pub(crate) fn attach(&mut self, basename: OsString, id: EntryId) {
        self.files.insert(basename, id);
    }

    pub(crate) fn detach(&mut self, basename: &OsStr) -> Option<EntryId> {
        self.files.remove(basename)
    }

    pub(crate) fn len(&self) -> usize {
        self.files.len()
    }

    pub(crate) fn info(&self, id: DirId) -> DirectoryInfo {
        DirectoryInfo {
            id,
            path: self.path.clone(),
            user_dir: self.user_dir,
            state: self.state,
            entries: self.len(),
        }
    }
}
