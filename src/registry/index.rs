//! The registry's mutable state: directories, entries and templates.
//!
//! Everything here runs under the registry lock, so nothing in this module
//! touches the filesystem. Candidates arrive already classified.

use crate::mime::MimeType;
use crate::registry::directory::{
    DirId, DirectoryInfo, DirectorySpec, DirectoryState, TemplateDirectory,
};
use crate::registry::entry::{Candidate, Contribution, EntryId, TemplateFileEntry};
use crate::registry::template::{merge, Template};
use serde::Serialize;
use slab::Slab;
use std::collections::HashMap;
use std::ffi::OsStr;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// How a registry mutation affected the set of templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "change", content = "mime_type", rename_all = "lowercase")]
pub enum TemplateChange {
    /// A template appeared for a MIME type.
    Added(MimeType),
    /// An existing template was rebuilt.
    Updated(MimeType),
    /// The last entry of a template went away.
    Removed(MimeType),
}

impl fmt::Display for TemplateChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateChange::Added(m) => write!(f, "added {}", m),
            TemplateChange::Updated(m) => write!(f, "updated {}", m),
            TemplateChange::Removed(m) => write!(f, "removed {}", m),
        }
    }
}

#[derive(Debug)]
struct TemplateSlot {
    template: Arc<Template>,
    /// Merge list, least relevant first.
    members: Vec<EntryId>,
}

#[derive(Debug)]
pub(crate) struct RegistryIndex {
    directories: Vec<TemplateDirectory>,
    entries: Slab<TemplateFileEntry>,
    templates: HashMap<MimeType, TemplateSlot>,
}

impl RegistryIndex {
    pub(crate) fn new(specs: Vec<DirectorySpec>) -> Self {
        Self {
            directories: specs.into_iter().map(TemplateDirectory::new).collect(),
            entries: Slab::new(),
            templates: HashMap::new(),
        }
    }

    pub(crate) fn directory_path(&self, dir: DirId) -> Option<&Path> {
        self.directories.get(dir).map(|d| d.path.as_path())
    }

    pub(crate) fn directory_count(&self) -> usize {
        self.directories.len()
    }

    pub(crate) fn directories(&self) -> Vec<DirectoryInfo> {
        self.directories
            .iter()
            .enumerate()
            .map(|(id, d)| d.info(id))
            .collect()
    }

    pub(crate) fn set_state(&mut self, dir: DirId, state: DirectoryState) {
        if let Some(d) = self.directories.get_mut(dir) {
            d.state = state;
        }
    }

    pub(crate) fn contains(&self, dir: DirId, basename: &OsStr) -> bool {
        self.lookup(dir, basename).is_some()
    }

    /// Whether a tracked file is a desktop entry; `None` when untracked.
    pub(crate) fn is_desktop_entry(&self, dir: DirId, basename: &OsStr) -> Option<bool> {
        self.lookup(dir, basename)
            .map(|id| self.entries[id].is_desktop_entry())
    }

    fn lookup(&self, dir: DirId, basename: &OsStr) -> Option<EntryId> {
        self.directories.get(dir)?.find(basename)
    }

    /// Track a new file and rebuild its template.
    ///
    /// Returns `None` when the directory already tracks the basename.
    pub(crate) fn insert(&mut self, dir: DirId, candidate: Candidate) -> Option<TemplateChange> {
        if dir >= self.directories.len() || self.contains(dir, &candidate.basename) {
            return None;
        }

        let basename = candidate.basename.clone();
        let mime_type = candidate.mime_type.clone();
        let id = self.entries.insert(TemplateFileEntry::new(dir, candidate));
        self.directories[dir].attach(basename, id);

        let created = !self.templates.contains_key(&mime_type);
        let slot = self
            .templates
            .entry(mime_type.clone())
            .or_insert_with(|| TemplateSlot {
                template: Arc::new(Template::new(mime_type.clone())),
                members: Vec::new(),
            });

        let entries = &self.entries;
        let key = entries[id].merge_key();
        let position = slot
            .members
            .partition_point(|&other| entries[other].merge_key() < key);
        slot.members.insert(position, id);

        tracing::debug!(
            mime_type = %mime_type,
            path = %self.entries[id].path.display(),
            position,
            "added template file"
        );

        self.rebuild(&mime_type);
        Some(if created {
            TemplateChange::Added(mime_type)
        } else {
            TemplateChange::Updated(mime_type)
        })
    }

    /// Stop tracking a file. Destroys its template when it was the last
    /// entry, otherwise rebuilds it.
    pub(crate) fn remove(&mut self, dir: DirId, basename: &OsStr) -> Option<TemplateChange> {
        let id = self.directories.get_mut(dir)?.detach(basename)?;
        let entry = self.entries.remove(id);
        let mime_type = entry.mime_type;

        let Some(slot) = self.templates.get_mut(&mime_type) else {
            tracing::error!(
                mime_type = %mime_type,
                path = %entry.path.display(),
                "template file has no template"
            );
            return None;
        };

        match slot.members.iter().position(|&m| m == id) {
            Some(position) => {
                slot.members.remove(position);
            }
            None => {
                tracing::error!(
                    mime_type = %mime_type,
                    path = %entry.path.display(),
                    "template file missing from merge list"
                );
            }
        }

        if slot.members.is_empty() {
            self.templates.remove(&mime_type);
            tracing::debug!(mime_type = %mime_type, "removed template");
            return Some(TemplateChange::Removed(mime_type));
        }

        self.rebuild(&mime_type);
        Some(TemplateChange::Updated(mime_type))
    }

    /// Replace a tracked file's contribution and rebuild its template.
    pub(crate) fn refresh(
        &mut self,
        dir: DirId,
        basename: &OsStr,
        contribution: Contribution,
    ) -> Option<TemplateChange> {
        let id = self.lookup(dir, basename)?;
        let entry = &mut self.entries[id];
        entry.set_contribution(contribution);
        let mime_type = entry.mime_type.clone();

        self.rebuild(&mime_type);
        Some(TemplateChange::Updated(mime_type))
    }

    fn rebuild(&self, mime_type: &MimeType) {
        let Some(slot) = self.templates.get(mime_type) else {
            return;
        };

        let attributes = merge(
            slot.members.iter().map(|&id| &self.entries[id]),
            |dir| self.directories.get(dir).is_some_and(|d| d.user_dir),
        );
        slot.template.publish(attributes);
    }

    pub(crate) fn find(&self, mime_type: &MimeType) -> Option<Arc<Template>> {
        self.templates
            .get(mime_type)
            .map(|slot| Arc::clone(&slot.template))
    }

    pub(crate) fn list(&self, user_only: bool) -> Vec<Arc<Template>> {
        self.templates
            .values()
            .filter(|slot| {
                let attributes = slot.template.attributes();
                !attributes.inactive && (!user_only || attributes.user_dir)
            })
            .map(|slot| Arc::clone(&slot.template))
            .collect()
    }

    #[cfg(test)]
    fn merge_list(&self, mime_type: &MimeType) -> Vec<String> {
        self.templates
            .get(mime_type)
            .map(|slot| {
                slot.members
                    .iter()
                    .map(|&id| self.entries[id].path.to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default()
    }
}
