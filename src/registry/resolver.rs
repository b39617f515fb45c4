//! The template registry.
//!
//! Directories are ranked least relevant first; entries from later
//! directories override those from earlier ones:
//! 1. System data dirs (`<dir>/templates`)
//! 2. User data dir (`~/.local/share/templates`)
//! 3. User "Templates" directory
//!
//! Filesystem work (listing, classification, desktop entry parsing) happens
//! before the lock is taken; only the index update runs under it.

use crate::config::{template_directories, RegistryConfig};
use crate::mime::{MimeService, MimeType, XdgMimeService};
use crate::registry::directory::{
    list_directory, ChangeKind, DirId, DirectoryChange, DirectoryInfo, DirectorySpec,
    DirectoryState, ListedFile,
};
use crate::registry::entry::{Candidate, Contribution};
use crate::registry::index::{RegistryIndex, TemplateChange};
use crate::registry::template::Template;
use parking_lot::Mutex;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Live registry of file templates, keyed by MIME type.
///
/// Cloning is cheap; clones share the same state.
#[derive(Clone)]
pub struct TemplateRegistry {
    inner: Arc<RegistryInner>,
}

struct RegistryInner {
    index: Mutex<RegistryIndex>,
    mime: Arc<dyn MimeService>,
}

impl std::fmt::Debug for TemplateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateRegistry")
            .field("directories", &self.directories())
            .finish()
    }
}

impl TemplateRegistry {
    /// Create an empty registry over `directories`, least relevant first.
    pub fn new(directories: Vec<DirectorySpec>, mime: Arc<dyn MimeService>) -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                index: Mutex::new(RegistryIndex::new(directories)),
                mime,
            }),
        }
    }

    /// Create an empty registry over the directories `config` selects.
    pub fn from_config(config: &RegistryConfig) -> Self {
        let directories = template_directories(config);
        let mime = match (&config.system_data_dirs, &config.user_data_dir) {
            (None, None) => XdgMimeService::from_env(),
            (system, user) => {
                let mut data_dirs: Vec<PathBuf> = user.iter().cloned().collect();
                data_dirs.extend(
                    system
                        .clone()
                        .unwrap_or_else(crate::config::system_data_dirs),
                );
                XdgMimeService::new(data_dirs)
            }
        };
        Self::new(directories, Arc::new(mime))
    }

    pub fn mime_service(&self) -> &dyn MimeService {
        self.inner.mime.as_ref()
    }

    pub fn shared_mime_service(&self) -> Arc<dyn MimeService> {
        Arc::clone(&self.inner.mime)
    }

    /// Active templates, optionally restricted to those whose most relevant
    /// entry is in a user directory. Order is unspecified.
    pub fn list(&self, user_only: bool) -> Vec<Arc<Template>> {
        self.inner.index.lock().list(user_only)
    }

    /// The template for a MIME type, active or not.
    pub fn find(&self, mime_type: &MimeType) -> Option<Arc<Template>> {
        self.inner.index.lock().find(mime_type)
    }

    /// Watched directories, least relevant first.
    pub fn directories(&self) -> Vec<DirectoryInfo> {
        self.inner.index.lock().directories()
    }

    pub fn directory_path(&self, dir: DirId) -> Option<PathBuf> {
        self.inner
            .index
            .lock()
            .directory_path(dir)
            .map(Path::to_path_buf)
    }

    pub(crate) fn directory_count(&self) -> usize {
        self.inner.index.lock().directory_count()
    }

    pub(crate) fn set_state(&self, dir: DirId, state: DirectoryState) {
        self.inner.index.lock().set_state(dir, state);
    }

    /// List every directory and apply the results.
    ///
    /// Directories that cannot be listed are skipped.
    pub fn populate(&self) -> Vec<TemplateChange> {
        let mut changes = Vec::new();
        for dir in 0..self.directory_count() {
            let Some(path) = self.directory_path(dir) else {
                continue;
            };
            self.set_state(dir, DirectoryState::Listing);
            match list_directory(&path) {
                Ok(files) => changes.extend(self.apply_listing(dir, files)),
                Err(e) => {
                    tracing::debug!(
                        path = %path.display(),
                        "cannot list template directory: {}",
                        e
                    );
                    self.set_state(dir, DirectoryState::Ready);
                }
            }
        }
        changes
    }

    /// Apply the initial listing of a directory.
    ///
    /// Files already tracked (from live events that raced the listing) are
    /// skipped; unclassifiable files are ignored.
    pub fn apply_listing(&self, dir: DirId, files: Vec<ListedFile>) -> Vec<TemplateChange> {
        let Some(path) = self.directory_path(dir) else {
            return Vec::new();
        };

        let mut candidates = Vec::new();
        for file in files {
            if self.inner.index.lock().contains(dir, &file.basename) {
                continue;
            }
            let inspected = Candidate::inspect(
                &path,
                &file.basename,
                file.is_desktop_entry,
                self.mime_service(),
            );
            match inspected {
                Some(candidate) => candidates.push(candidate),
                None => {
                    tracing::debug!(
                        path = %path.join(&file.basename).display(),
                        "could not guess type of template file"
                    );
                }
            }
        }

        let mut index = self.inner.index.lock();
        let changes = candidates
            .into_iter()
            .filter_map(|candidate| index.insert(dir, candidate))
            .collect();
        index.set_state(dir, DirectoryState::Ready);
        changes
    }

    /// Apply one live change notification for directory `dir`.
    pub fn apply_change(&self, dir: DirId, change: DirectoryChange) -> Vec<TemplateChange> {
        let Some(dir_path) = self.directory_path(dir) else {
            return Vec::new();
        };
        if change.path == dir_path {
            return Vec::new();
        }
        let Some(basename) = change.path.file_name() else {
            return Vec::new();
        };

        let result = match change.kind {
            ChangeKind::Created => self.file_created(dir, &dir_path, basename),
            ChangeKind::Deleted => self.inner.index.lock().remove(dir, basename),
            ChangeKind::Modified => self.file_modified(dir, &dir_path, basename),
            ChangeKind::Renamed if change.path.exists() => {
                self.file_created(dir, &dir_path, basename)
            }
            ChangeKind::Renamed => self.inner.index.lock().remove(dir, basename),
            ChangeKind::Other => None,
        };
        result.into_iter().collect()
    }

    fn file_created(
        &self,
        dir: DirId,
        dir_path: &Path,
        basename: &OsStr,
    ) -> Option<TemplateChange> {
        let path = dir_path.join(basename);
        if self.inner.index.lock().contains(dir, basename) {
            tracing::debug!(path = %path.display(), "template file already tracked");
            return None;
        }

        let is_desktop_entry = crate::registry::directory::is_desktop_entry_name(basename);
        let Some(candidate) =
            Candidate::inspect(dir_path, basename, is_desktop_entry, self.mime_service())
        else {
            tracing::warn!(path = %path.display(), "could not guess type of template file");
            return None;
        };

        let change = self.inner.index.lock().insert(dir, candidate);
        if change.is_none() {
            tracing::debug!(path = %path.display(), "template file already tracked");
        }
        change
    }

    fn file_modified(
        &self,
        dir: DirId,
        dir_path: &Path,
        basename: &OsStr,
    ) -> Option<TemplateChange> {
        let path = dir_path.join(basename);
        let is_desktop_entry = self.inner.index.lock().is_desktop_entry(dir, basename);
        match is_desktop_entry {
            None => {
                tracing::warn!(path = %path.display(), "change for unknown template file");
                None
            }
            Some(false) => None,
            Some(true) => {
                let contribution = Contribution::load(&path, true, dir_path);
                self.inner.index.lock().refresh(dir, basename, contribution)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mime::StaticMimeService;
    use std::fs;
    use tempfile::TempDir;

    fn registry(temp: &TempDir) -> TemplateRegistry {
        let sys = temp.path().join("sys");
        let home = temp.path().join("home");
        fs::create_dir_all(&sys).unwrap();
        fs::create_dir_all(&home).unwrap();
        let mime = StaticMimeService::new()
            .with_extension("txt", "text/plain")
            .with_extension("py", "text/x-python");
        TemplateRegistry::new(
            vec![DirectorySpec::system(sys), DirectorySpec::user(home)],
            Arc::new(mime),
        )
    }

    #[test]
    fn populate_lists_every_directory() {
        let temp = TempDir::new().unwrap();
        let reg = registry(&temp);
        fs::write(temp.path().join("sys/a.txt"), "").unwrap();
        fs::write(temp.path().join("home/b.py"), "").unwrap();
        fs::write(temp.path().join("home/README"), "").unwrap();

        let changes = reg.populate();
        assert_eq!(changes.len(), 2);
        assert_eq!(reg.list(false).len(), 2);
        assert!(reg
            .directories()
            .iter()
            .all(|d| d.state == DirectoryState::Ready));
    }

    #[test]
    fn populate_skips_missing_directory() {
        let temp = TempDir::new().unwrap();
        let mime = StaticMimeService::new();
        let reg = TemplateRegistry::new(
            vec![DirectorySpec::user(temp.path().join("absent"))],
            Arc::new(mime),
        );
        assert!(reg.populate().is_empty());
        assert_eq!(reg.directories()[0].state, DirectoryState::Ready);
    }

    #[test]
    fn listing_skips_files_already_tracked() {
        let temp = TempDir::new().unwrap();
        let reg = registry(&temp);
        let home = temp.path().join("home");
        fs::write(home.join("a.txt"), "").unwrap();

        reg.apply_change(1, DirectoryChange::created(home.join("a.txt")));
        let changes = reg.apply_listing(1, vec![ListedFile::new("a.txt")]);
        assert!(changes.is_empty());
        assert_eq!(reg.directories()[1].entries, 1);
    }

    #[test]
    fn change_on_directory_itself_is_ignored() {
        let temp = TempDir::new().unwrap();
        let reg = registry(&temp);
        let home = temp.path().join("home");
        assert!(reg.apply_change(1, DirectoryChange::deleted(&home)).is_empty());
    }

    #[test]
    fn created_then_deleted() {
        let temp = TempDir::new().unwrap();
        let reg = registry(&temp);
        let home = temp.path().join("home");
        fs::write(home.join("a.txt"), "").unwrap();

        let changes = reg.apply_change(1, DirectoryChange::created(home.join("a.txt")));
        assert_eq!(changes, vec![TemplateChange::Added(MimeType::new("text/plain"))]);
        assert!(reg
            .apply_change(1, DirectoryChange::created(home.join("a.txt")))
            .is_empty());

        fs::remove_file(home.join("a.txt")).unwrap();
        let changes = reg.apply_change(1, DirectoryChange::deleted(home.join("a.txt")));
        assert_eq!(changes, vec![TemplateChange::Removed(MimeType::new("text/plain"))]);
        assert!(reg.find(&MimeType::new("text/plain")).is_none());
    }

    #[test]
    fn unclassifiable_creation_is_ignored() {
        let temp = TempDir::new().unwrap();
        let reg = registry(&temp);
        let home = temp.path().join("home");
        fs::write(home.join("README"), "").unwrap();
        assert!(reg
            .apply_change(1, DirectoryChange::created(home.join("README")))
            .is_empty());
    }

    #[test]
    fn modified_desktop_entry_rebuilds() {
        let temp = TempDir::new().unwrap();
        let reg = registry(&temp);
        let home = temp.path().join("home");
        let entry = home.join("doc.desktop");
        fs::write(&entry, "[Desktop Entry]\nMimeType=text/plain\nName=Before\n").unwrap();
        reg.populate();

        let template = reg.find(&MimeType::new("text/plain")).unwrap();
        assert_eq!(template.label().as_deref(), Some("Before"));

        fs::write(&entry, "[Desktop Entry]\nMimeType=text/plain\nName=After\n").unwrap();
        let changes = reg.apply_change(1, DirectoryChange::modified(&entry));
        assert_eq!(changes, vec![TemplateChange::Updated(MimeType::new("text/plain"))]);
        assert_eq!(template.label().as_deref(), Some("After"));

        fs::write(&entry, "[Desktop Entry]\nMimeType=text/plain\nHidden=true\n").unwrap();
        reg.apply_change(1, DirectoryChange::modified(&entry));
        assert!(reg.list(false).is_empty());
        assert!(!template.is_active());
    }

    #[test]
    fn modified_plain_file_and_unknown_file_change_nothing() {
        let temp = TempDir::new().unwrap();
        let reg = registry(&temp);
        let home = temp.path().join("home");
        fs::write(home.join("a.txt"), "").unwrap();
        reg.populate();

        assert!(reg
            .apply_change(1, DirectoryChange::modified(home.join("a.txt")))
            .is_empty());
        assert!(reg
            .apply_change(1, DirectoryChange::modified(home.join("b.txt")))
            .is_empty());
        assert!(reg
            .apply_change(1, DirectoryChange::new(ChangeKind::Other, home.join("a.txt")))
            .is_empty());
    }

    #[test]
    fn rename_of_unknown_direction_checks_presence() {
        let temp = TempDir::new().unwrap();
        let reg = registry(&temp);
        let home = temp.path().join("home");
        fs::write(home.join("new.txt"), "").unwrap();

        let changes = reg.apply_change(1, DirectoryChange::renamed(home.join("new.txt")));
        assert_eq!(changes, vec![TemplateChange::Added(MimeType::new("text/plain"))]);

        fs::remove_file(home.join("new.txt")).unwrap();
        let changes = reg.apply_change(1, DirectoryChange::renamed(home.join("new.txt")));
        assert_eq!(changes, vec![TemplateChange::Removed(MimeType::new("text/plain"))]);
        assert!(reg.find(&MimeType::new("text/plain")).is_none());
    }

    #[test]
    fn unknown_directory_is_ignored() {
        let temp = TempDir::new().unwrap();
        let reg = registry(&temp);
        assert!(reg.apply_listing(7, vec![ListedFile::new("a.txt")]).is_empty());
        assert!(reg
            .apply_change(7, DirectoryChange::created("/x/a.txt"))
            .is_empty());
    }
}
