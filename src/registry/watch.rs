//! Live maintenance of a [`TemplateRegistry`].
//!
//! Each directory is listed on its own thread while a `notify` watcher
//! reports changes. Listings and change events all go through one channel
//! to a single coordinating thread, which applies them to the registry in
//! arrival order.

use crate::registry::directory::{
    list_directory, ChangeKind, DirId, DirectoryChange, DirectoryState, ListedFile,
};
use crate::registry::index::TemplateChange;
use crate::registry::resolver::TemplateRegistry;
use notify::event::{ModifyKind, RenameMode};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

enum Message {
    Listed {
        dir: DirId,
        result: io::Result<Vec<ListedFile>>,
    },
    Changed {
        dir: DirId,
        change: DirectoryChange,
    },
    Shutdown,
}

/// Handle to the background threads keeping a registry up to date.
///
/// Dropping it stops the watchers and the coordinating thread.
pub struct RegistryMonitor {
    registry: TemplateRegistry,
    sender: Sender<Message>,
    watchers: Vec<RecommendedWatcher>,
    coordinator: Option<JoinHandle<()>>,
}

impl RegistryMonitor {
    /// Populate `registry` asynchronously and keep it in sync with the
    /// filesystem. `on_change` runs on the coordinating thread after every
    /// batch of changes.
    pub fn start<F>(registry: TemplateRegistry, on_change: F) -> Self
    where
        F: Fn(&[TemplateChange]) + Send + 'static,
    {
        Self::spawn(registry, true, on_change)
    }

    /// Populate `registry` asynchronously without watching for changes.
    pub fn list_only<F>(registry: TemplateRegistry, on_change: F) -> Self
    where
        F: Fn(&[TemplateChange]) + Send + 'static,
    {
        Self::spawn(registry, false, on_change)
    }

    fn spawn<F>(registry: TemplateRegistry, subscribe: bool, on_change: F) -> Self
    where
        F: Fn(&[TemplateChange]) + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();

        let coordinator = {
            let registry = registry.clone();
            thread::spawn(move || {
                for message in receiver {
                    let changes = match message {
                        Message::Listed { dir, result } => match result {
                            Ok(files) => registry.apply_listing(dir, files),
                            Err(e) => {
                                tracing::debug!(dir, "cannot list template directory: {}", e);
                                registry.set_state(dir, DirectoryState::Ready);
                                Vec::new()
                            }
                        },
                        Message::Changed { dir, change } => registry.apply_change(dir, change),
                        Message::Shutdown => break,
                    };
                    if !changes.is_empty() {
                        on_change(&changes);
                    }
                }
                tracing::debug!("registry monitor stopped");
            })
        };

        let mut watchers = Vec::new();
        for dir in 0..registry.directory_count() {
            let Some(path) = registry.directory_path(dir) else {
                continue;
            };

            if subscribe {
                match subscribe_directory(dir, &path, sender.clone()) {
                    Ok(watcher) => watchers.push(watcher),
                    Err(e) => {
                        tracing::debug!(
                            path = %path.display(),
                            "cannot watch template directory: {}",
                            e
                        );
                    }
                }
            }

            registry.set_state(dir, DirectoryState::Listing);
            let sender = sender.clone();
            thread::spawn(move || {
                let result = list_directory(&path);
                // the coordinator may already be gone
                let _ = sender.send(Message::Listed { dir, result });
            });
        }

        Self {
            registry,
            sender,
            watchers,
            coordinator: Some(coordinator),
        }
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Number of directories with a live subscription.
    pub fn watched(&self) -> usize {
        self.watchers.len()
    }

    /// Block until every directory finished its initial listing, or the
    /// timeout elapses. Returns whether all directories are ready.
    pub fn wait_ready(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            let ready = self
                .registry
                .directories()
                .iter()
                .all(|d| d.state == DirectoryState::Ready);
            if ready {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            thread::sleep(Duration::from_millis(10));
        }
    }
}

impl Drop for RegistryMonitor {
    fn drop(&mut self) {
        self.watchers.clear();
        let _ = self.sender.send(Message::Shutdown);
        if let Some(handle) = self.coordinator.take() {
            if handle.join().is_err() {
                tracing::error!("registry monitor thread panicked");
            }
        }
    }
}

fn subscribe_directory(
    dir: DirId,
    path: &Path,
    sender: Sender<Message>,
) -> notify::Result<RecommendedWatcher> {
    let mut watcher = notify::recommended_watcher(move |result: notify::Result<Event>| {
        match result {
            Ok(event) => {
                for change in translate(&event) {
                    let _ = sender.send(Message::Changed { dir, change });
                }
            }
            Err(e) => tracing::debug!("watch error: {}", e),
        }
    })?;
    watcher.watch(path, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

/// Map a `notify` event onto directory changes.
///
/// Renames become a deletion of the old name and a creation of the new one.
/// A rename of unknown direction is passed on as such; the registry checks
/// the file when applying it. Nothing here touches the filesystem.
pub(crate) fn translate(event: &Event) -> Vec<DirectoryChange> {
    let each = |make: fn(PathBuf) -> DirectoryChange| -> Vec<DirectoryChange> {
        event.paths.iter().cloned().map(make).collect()
    };

    match event.kind {
        EventKind::Create(_) => each(DirectoryChange::created),
        EventKind::Remove(_) => each(DirectoryChange::deleted),
        EventKind::Modify(ModifyKind::Data(_)) | EventKind::Modify(ModifyKind::Any) => {
            each(DirectoryChange::modified)
        }
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => each(DirectoryChange::deleted),
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => each(DirectoryChange::created),
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
            let mut changes: Vec<_> = event
                .paths
                .first()
                .cloned()
                .map(DirectoryChange::deleted)
                .into_iter()
                .collect();
            if let Some(to) = event.paths.get(1) {
                changes.push(DirectoryChange::created(to.clone()));
            }
            changes
        }
        EventKind::Modify(ModifyKind::Name(_)) => each(DirectoryChange::renamed),
        _ => each(|p| DirectoryChange::new(ChangeKind::Other, p)),
    }
}
