//! MIME types, icons and template classification.
//!
//! - [`MimeType`] - cheap, hashable MIME type handle
//! - [`Icon`] - themed icon name or icon file path
//! - [`MimeService`] - name-based type guessing and default applications
//! - [`classify`] - effective MIME type of a template candidate file

pub mod classifier;
pub mod service;

pub use classifier::{classify, resolve_target};
pub use service::{Application, MimeService, NameGuess, StaticMimeService, XdgMimeService};

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// MIME type of directory templates.
pub const DIRECTORY: &str = "inode/directory";

/// MIME type of templates that are themselves application entries.
pub const DESKTOP_APPLICATION: &str = "application/x-desktop";

/// A MIME type handle.
///
/// Names are normalized to lowercase, so two handles compare equal exactly
/// when they name the same type. Cloning is a reference-count bump.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct MimeType(Arc<str>);

impl MimeType {
    /// Create a handle from a type name such as `text/plain`.
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name.trim().to_ascii_lowercase()))
    }

    /// The `inode/directory` type.
    pub fn directory() -> Self {
        Self::new(DIRECTORY)
    }

    /// The `application/x-desktop` type.
    pub fn desktop_application() -> Self {
        Self::new(DESKTOP_APPLICATION)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_directory(&self) -> bool {
        &*self.0 == DIRECTORY
    }

    /// Default icon for this type.
    ///
    /// Directories use `folder`; every other type uses its generic themed
    /// icon name, `text/x-python` becoming `text-x-python`.
    pub fn icon(&self) -> Icon {
        if self.is_directory() {
            Icon::Name("folder".to_string())
        } else {
            Icon::Name(self.0.replace('/', "-"))
        }
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MimeType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<MimeType> for String {
    fn from(mime_type: MimeType) -> Self {
        mime_type.0.to_string()
    }
}

/// An icon: either a themed icon name or an absolute path to an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Icon {
    Name(String),
    Path(PathBuf),
}

impl Icon {
    /// Interpret a desktop-entry `Icon` value.
    pub fn from_desktop_value(value: &str) -> Self {
        if Path::new(value).is_absolute() {
            Icon::Path(PathBuf::from(value))
        } else {
            Icon::Name(value.to_string())
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Icon::Name(name) => f.write_str(name),
            Icon::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_type_normalizes_case() {
        assert_eq!(MimeType::new("Text/Plain"), MimeType::new("text/plain"));
        assert_eq!(MimeType::new(" text/plain ").as_str(), "text/plain");
    }

    #[test]
    fn directory_type_is_directory() {
        assert!(MimeType::directory().is_directory());
        assert!(!MimeType::new("text/plain").is_directory());
    }

    #[test]
    fn default_icon_names() {
        assert_eq!(
            MimeType::new("text/x-python").icon(),
            Icon::Name("text-x-python".into())
        );
        assert_eq!(MimeType::directory().icon(), Icon::Name("folder".into()));
    }

    #[test]
    fn icon_from_desktop_value() {
        assert_eq!(
            Icon::from_desktop_value("/usr/share/icons/a.png"),
            Icon::Path(PathBuf::from("/usr/share/icons/a.png"))
        );
        assert_eq!(
            Icon::from_desktop_value("x-office-document"),
            Icon::Name("x-office-document".into())
        );
    }

    #[test]
    fn mime_type_serializes_as_string() {
        let json = serde_json::to_string(&MimeType::new("text/plain")).unwrap();
        assert_eq!(json, "\"text/plain\"");
    }
}
