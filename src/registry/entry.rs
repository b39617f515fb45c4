//! Template file entries.
//!
//! Every candidate file discovered in a watched directory becomes one
//! [`TemplateFileEntry`], owned by the registry's entry arena and referenced
//! by id from its directory and from its template's merge list.

use crate::desktop::{current_locales, DesktopEntry};
use crate::mime::{classify, resolve_target, Icon, MimeService, MimeType};
use crate::registry::directory::DirId;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Arena index of a [`TemplateFileEntry`].
pub(crate) type EntryId = usize;

/// Attributes a desktop entry contributes to its template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesktopContribution {
    /// `Hidden=true`: the entry contributes nothing and deactivates the
    /// template when it is the most relevant entry.
    pub hidden: bool,
    pub target: Option<PathBuf>,
    pub icon: Option<Icon>,
    pub command: Option<String>,
    pub label: Option<String>,
    pub prompt: Option<String>,
}

impl DesktopContribution {
    /// Extract the template keys of a parsed entry stored in `dir`.
    pub fn from_entry(entry: &DesktopEntry, dir: &Path, locales: &[String]) -> Self {
        if entry.boolean("Hidden").unwrap_or(false) {
            return Self {
                hidden: true,
                ..Default::default()
            };
        }

        Self {
            hidden: false,
            target: entry.string("URL").map(|url| resolve_target(dir, &url)),
            icon: entry.string("Icon").map(|icon| Icon::from_desktop_value(&icon)),
            command: entry.string("Exec"),
            label: entry.locale_string("Name", locales),
            prompt: entry.locale_string("Comment", locales),
        }
    }
}

/// What an entry adds to its template's merged attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Contribution {
    /// A plain file is template content itself.
    Content,
    Desktop(DesktopContribution),
    /// A desktop entry that failed to parse contributes nothing.
    Unreadable,
}

impl Contribution {
    /// Read the contribution of the file at `path`, stored in `dir`.
    pub(crate) fn load(path: &Path, is_desktop_entry: bool, dir: &Path) -> Self {
        if !is_desktop_entry {
            return Contribution::Content;
        }

        match DesktopEntry::load(path) {
            Ok(entry) => Contribution::Desktop(DesktopContribution::from_entry(
                &entry,
                dir,
                &current_locales(),
            )),
            Err(e) => {
                tracing::warn!("{}", e);
                Contribution::Unreadable
            }
        }
    }
}

/// A classified candidate file, prepared before taking the registry lock.
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    pub(crate) basename: OsString,
    pub(crate) path: PathBuf,
    pub(crate) mime_type: MimeType,
    pub(crate) contribution: Contribution,
}

impl Candidate {
    /// Classify and load `basename` inside `dir`. `None` when the file has
    /// no usable MIME type.
    pub(crate) fn inspect(
        dir: &Path,
        basename: &OsStr,
        is_desktop_entry: bool,
        service: &dyn MimeService,
    ) -> Option<Self> {
        let path = dir.join(basename);
        let mime_type = classify(&path, is_desktop_entry, service)?;
        let contribution = Contribution::load(&path, is_desktop_entry, dir);

        Some(Self {
            basename: basename.to_os_string(),
            path,
            mime_type,
            contribution,
        })
    }
}

/// One discovered template file.
#[derive(Debug, Clone)]
pub(crate) struct TemplateFileEntry {
    pub(crate) dir: DirId,
    pub(crate) basename: OsString,
    pub(crate) path: PathBuf,
    pub(crate) mime_type: MimeType,
    pub(crate) contribution: Contribution,
    /// Last known `Hidden` state; kept when a later reload fails to parse.
    pub(crate) inactive: bool,
}

impl TemplateFileEntry {
    pub(crate) fn new(dir: DirId, candidate: Candidate) -> Self {
        let mut entry = Self {
            dir,
            basename: candidate.basename,
            path: candidate.path,
            mime_type: candidate.mime_type,
            contribution: Contribution::Content,
            inactive: false,
        };
        entry.set_contribution(candidate.contribution);
        entry
    }

    pub(crate) fn is_desktop_entry(&self) -> bool {
        !matches!(self.contribution, Contribution::Content)
    }

    pub(crate) fn set_contribution(&mut self, contribution: Contribution) {
        if let Contribution::Desktop(desktop) = &contribution {
            self.inactive = desktop.hidden;
        }
        self.contribution = contribution;
    }

    /// Position key in a merge list, least relevant first: directory
    /// priority, then desktop entries above plain files, then name.
    pub(crate) fn merge_key(&self) -> (DirId, bool, &OsStr) {
        (self.dir, self.is_desktop_entry(), &self.basename)
    }
}
