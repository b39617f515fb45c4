//! MIME type service: name-based guessing and default applications.

use crate::desktop::{current_locales, DesktopEntry};
use crate::mime::MimeType;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Result of guessing a MIME type from a file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameGuess {
    pub mime_type: MimeType,
    /// False when the name alone is not enough to trust the guess.
    pub certain: bool,
}

/// An application able to open files of some MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    /// Desktop file id, e.g. `org.gnome.TextEditor.desktop`.
    pub id: String,
    /// Display name.
    pub name: Option<String>,
    /// Command line with desktop-entry field codes.
    pub exec: String,
}

/// MIME type lookups the registry and file creation depend on.
pub trait MimeService: Send + Sync {
    /// Guess a type from a file's basename.
    fn guess_from_name(&self, basename: &str) -> Option<NameGuess>;

    /// The application configured to open files of this type.
    fn default_application(&self, mime_type: &MimeType) -> Option<Application>;
}

/// MIME service backed by `mime_guess` and the `xdg-mime` tool.
#[derive(Debug, Clone)]
pub struct XdgMimeService {
    data_dirs: Vec<PathBuf>,
}

impl XdgMimeService {
    /// Create a service searching `data_dirs` (most relevant first) for
    /// `applications/*.desktop`.
    pub fn new(data_dirs: Vec<PathBuf>) -> Self {
        Self { data_dirs }
    }

    /// Create a service for the current user's XDG data directories.
    pub fn from_env() -> Self {
        let mut data_dirs: Vec<PathBuf> = crate::config::user_data_dir().into_iter().collect();
        data_dirs.extend(crate::config::system_data_dirs());
        Self::new(data_dirs)
    }

    fn query_default(mime_type: &MimeType) -> Option<String> {
        let output = Command::new("xdg-mime")
            .args(["query", "default", mime_type.as_str()])
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .ok()?;

        if !output.status.success() {
            return None;
        }

        let id = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if id.is_empty() {
            None
        } else {
            Some(id)
        }
    }

    fn find_application(&self, id: &str) -> Option<Application> {
        self.data_dirs
            .iter()
            .map(|dir| dir.join("applications").join(id))
            .find(|path| path.is_file())
            .and_then(|path| load_application(id, &path))
    }
}

impl MimeService for XdgMimeService {
    fn guess_from_name(&self, basename: &str) -> Option<NameGuess> {
        mime_guess::from_path(basename)
            .first_raw()
            .map(|raw| NameGuess {
                mime_type: MimeType::new(raw),
                certain: true,
            })
    }

    fn default_application(&self, mime_type: &MimeType) -> Option<Application> {
        let id = Self::query_default(mime_type)?;
        let app = self.find_application(&id);
        if app.is_none() {
            tracing::debug!(id = %id, "default application entry not found");
        }
        app
    }
}

fn load_application(id: &str, path: &Path) -> Option<Application> {
    match DesktopEntry::load(path) {
        Ok(entry) => Some(Application {
            id: id.to_string(),
            name: entry.locale_string("Name", &current_locales()),
            exec: entry.string("Exec")?,
        }),
        Err(e) => {
            tracing::warn!("{}", e);
            None
        }
    }
}

/// MIME service answering from fixed tables.
///
/// Useful for embedding the registry where no desktop environment is
/// available, and as a test double.
///
/// # Example
///
/// ```
/// use stencil::mime::{MimeService, MimeType, StaticMimeService};
///
/// let service = StaticMimeService::new().with_extension("py", "text/x-python");
/// let guess = service.guess_from_name("script.py").unwrap();
/// assert_eq!(guess.mime_type, MimeType::new("text/x-python"));
/// ```
#[derive(Debug, Default)]
pub struct StaticMimeService {
    extensions: HashMap<String, MimeType>,
    applications: HashMap<MimeType, Application>,
    lookups: AtomicUsize,
}

impl StaticMimeService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a file extension (without the dot) to a type.
    pub fn with_extension(mut self, extension: &str, mime_type: &str) -> Self {
        self.extensions
            .insert(extension.to_ascii_lowercase(), MimeType::new(mime_type));
        self
    }

    /// Register the default application of a type.
    pub fn with_application(mut self, mime_type: &str, application: Application) -> Self {
        self.applications
            .insert(MimeType::new(mime_type), application);
        self
    }

    /// Number of default-application lookups made so far.
    pub fn application_lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }
}

impl MimeService for StaticMimeService {
    fn guess_from_name(&self, basename: &str) -> Option<NameGuess> {
        let (_, extension) = basename.rsplit_once('.')?;
        self.extensions
            .get(&extension.to_ascii_lowercase())
            .map(|mime_type| NameGuess {
                mime_type: mime_type.clone(),
                certain: true,
            })
    }

    fn default_application(&self, mime_type: &MimeType) -> Option<Application> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        self.applications.get(mime_type).cloned()
    }
}
