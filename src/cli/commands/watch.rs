//! Watch command implementation.
//!
//! The `stencil watch` command populates the registry in the background and
//! prints every template change until interrupted.

use std::sync::mpsc;
use std::time::Duration;

use crate::error::Result;
use crate::registry::{RegistryMonitor, TemplateChange, TemplateRegistry};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

const READY_TIMEOUT: Duration = Duration::from_secs(30);

/// The watch command implementation.
pub struct WatchCommand {
    registry: TemplateRegistry,
    subscribe: bool,
    max_batches: Option<usize>,
}

impl WatchCommand {
    /// `subscribe` false only performs the initial listing.
    pub fn new(registry: TemplateRegistry, subscribe: bool) -> Self {
        Self {
            registry,
            subscribe,
            max_batches: None,
        }
    }

    /// Stop after printing this many change batches.
    #[cfg(test)]
    pub(crate) fn with_max_batches(mut self, max: usize) -> Self {
        self.max_batches = Some(max);
        self
    }

    fn print(&self, ui: &mut dyn UserInterface, changes: &[TemplateChange]) {
        let theme = ui.theme().clone();
        for change in changes {
            let line = match change {
                TemplateChange::Added(m) => format!("{} {}", theme.added.apply_to("+"), m),
                TemplateChange::Updated(m) => format!("{} {}", theme.dim.apply_to("~"), m),
                TemplateChange::Removed(m) => format!("{} {}", theme.removed.apply_to("-"), m),
            };
            ui.message(&line);
        }
    }
}

impl Command for WatchCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let (sender, receiver) = mpsc::channel::<Vec<TemplateChange>>();
        let on_change = move |changes: &[TemplateChange]| {
            let _ = sender.send(changes.to_vec());
        };

        let monitor = if self.subscribe {
            RegistryMonitor::start(self.registry.clone(), on_change)
        } else {
            RegistryMonitor::list_only(self.registry.clone(), on_change)
        };

        if !monitor.wait_ready(READY_TIMEOUT) {
            ui.warning("Some template directories are still being listed");
        }

        if !self.subscribe {
            drop(monitor);
            for changes in receiver.try_iter() {
                self.print(ui, &changes);
            }
            ui.warning("Watching is disabled in the configuration");
            return Ok(CommandResult::success());
        }

        ui.success(&format!(
            "Watching {} of {} template directories",
            monitor.watched(),
            self.registry.directories().len()
        ));

        let mut batches = 0;
        for changes in receiver.iter() {
            self.print(ui, &changes);
            batches += 1;
            if self.max_batches.is_some_and(|max| batches >= max) {
                break;
            }
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mime::StaticMimeService;
    use crate::registry::DirectorySpec;
    use crate::ui::MockUI;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn registry(temp: &TempDir) -> TemplateRegistry {
        fs::write(temp.path().join("a.txt"), "").unwrap();
        TemplateRegistry::new(
            vec![DirectorySpec::user(temp.path())],
            Arc::new(StaticMimeService::new().with_extension("txt", "text/plain")),
        )
    }

    #[test]
    fn watch_without_subscription_prints_initial_listing() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        let result = WatchCommand::new(registry(&temp), false)
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert_eq!(ui.messages(), ["+ text/plain"]);
        assert_eq!(ui.warnings().len(), 1);
    }

    #[test]
    fn watch_prints_initial_batch() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        let result = WatchCommand::new(registry(&temp), true)
            .with_max_batches(1)
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert_eq!(ui.messages(), ["+ text/plain"]);
    }
}
