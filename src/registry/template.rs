//! Templates: the merged descriptor offered for one MIME type.
//!
//! A template's attributes are never edited in place. Whenever its merge
//! list changes, or a desktop entry in it is edited, the registry folds the
//! whole list again with [`merge`] and publishes the result in one step, so
//! readers always see a complete snapshot.

use crate::mime::{Icon, MimeType};
use crate::registry::directory::DirId;
use crate::registry::entry::{Contribution, TemplateFileEntry};
use parking_lot::RwLock;
use serde::Serialize;
use std::path::PathBuf;

/// Merged attributes of a template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TemplateAttributes {
    /// File whose contents seed new files.
    pub file: Option<PathBuf>,
    pub icon: Option<Icon>,
    /// Command to run instead of the type's default application.
    pub command: Option<String>,
    /// Prompt shown when asking for the new file's name.
    pub prompt: Option<String>,
    /// Menu label.
    pub label: Option<String>,
    /// The most relevant entry is a hidden desktop entry.
    pub inactive: bool,
    /// The most relevant entry lives in a user directory.
    pub user_dir: bool,
}

/// File name suggested for new files made from a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateName {
    /// Name without its last suffix (`Untitled` for `Untitled.odt`).
    pub stem: String,
    /// Full file name.
    pub basename: String,
}

impl TemplateName {
    fn from_basename(basename: String) -> Self {
        let stem = match basename.rfind('.') {
            Some(dot) => basename[..dot].to_string(),
            None => basename.clone(),
        };
        Self { stem, basename }
    }
}

/// A template for one MIME type.
///
/// Handles are shared as `Arc<Template>`. A handle stays usable after the
/// registry drops the template; it then keeps its last attributes.
#[derive(Debug)]
pub struct Template {
    mime_type: MimeType,
    attributes: RwLock<TemplateAttributes>,
}

impl Template {
    pub(crate) fn new(mime_type: MimeType) -> Self {
        Self {
            mime_type,
            attributes: RwLock::new(TemplateAttributes::default()),
        }
    }

    pub fn mime_type(&self) -> &MimeType {
        &self.mime_type
    }

    /// Snapshot of all attributes.
    pub fn attributes(&self) -> TemplateAttributes {
        self.attributes.read().clone()
    }

    /// Suggested file name, from the template's backing file.
    pub fn name(&self) -> Option<TemplateName> {
        let attributes = self.attributes.read();
        let basename = attributes.file.as_ref()?.file_name()?;
        Some(TemplateName::from_basename(
            basename.to_string_lossy().into_owned(),
        ))
    }

    /// The declared icon, or the MIME type's default icon.
    pub fn icon(&self) -> Icon {
        let declared = self.attributes.read().icon.clone();
        declared.unwrap_or_else(|| self.mime_type.icon())
    }

    pub fn prompt(&self) -> Option<String> {
        self.attributes.read().prompt.clone()
    }

    pub fn label(&self) -> Option<String> {
        self.attributes.read().label.clone()
    }

    pub fn command(&self) -> Option<String> {
        self.attributes.read().command.clone()
    }

    pub fn file(&self) -> Option<PathBuf> {
        self.attributes.read().file.clone()
    }

    pub fn is_directory(&self) -> bool {
        self.mime_type.is_directory()
    }

    /// Whether the template is offered in listings.
    pub fn is_active(&self) -> bool {
        !self.attributes.read().inactive
    }

    pub(crate) fn publish(&self, attributes: TemplateAttributes) {
        *self.attributes.write() = attributes;
    }
}

/// Fold a merge list, least relevant entry first, into template attributes.
///
/// Desktop entries overwrite each attribute they declare. A plain file only
/// provides the backing file when nothing before it did. `user_dir` reports
/// whether a directory belongs to the user.
pub(crate) fn merge<'a, I, F>(entries: I, user_dir: F) -> TemplateAttributes
where
    I: IntoIterator<Item = &'a TemplateFileEntry>,
    F: Fn(DirId) -> bool,
{
    let mut attributes = TemplateAttributes::default();
    let mut most_relevant = None;

    for entry in entries {
        match &entry.contribution {
            Contribution::Desktop(desktop) if !desktop.hidden => {
                if let Some(target) = &desktop.target {
                    attributes.file = Some(target.clone());
                }
                if let Some(icon) = &desktop.icon {
                    attributes.icon = Some(icon.clone());
                }
                if let Some(command) = &desktop.command {
                    attributes.command = Some(command.clone());
                }
                if let Some(label) = &desktop.label {
                    attributes.label = Some(label.clone());
                }
                if let Some(prompt) = &desktop.prompt {
                    attributes.prompt = Some(prompt.clone());
                }
            }
            Contribution::Desktop(_) => {}
            Contribution::Unreadable => {
                tracing::trace!(path = %entry.path.display(), "skipping unreadable entry");
            }
            Contribution::Content => {
                if attributes.file.is_none() {
                    attributes.file = Some(entry.path.clone());
                }
            }
        }
        most_relevant = Some(entry);
    }

    if let Some(entry) = most_relevant {
        attributes.inactive = entry.inactive;
        attributes.user_dir = user_dir(entry.dir);
    }

    attributes
}
