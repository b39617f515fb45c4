//! Dirs command implementation.
//!
//! The `stencil dirs` command prints the watched directories, least
//! relevant first.

use crate::error::Result;
use crate::registry::{DirectoryState, TemplateRegistry};
use crate::ui::{Table, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The dirs command implementation.
pub struct DirsCommand {
    registry: TemplateRegistry,
}

impl DirsCommand {
    pub fn new(registry: TemplateRegistry) -> Self {
        Self { registry }
    }
}

impl Command for DirsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let directories = self.registry.directories();
        if directories.is_empty() {
            ui.warning("No template directories configured.");
            return Ok(CommandResult::success());
        }

        let theme = ui.theme().clone();
        let mut table = Table::new(&["RANK", "KIND", "STATE", "FILES", "PATH"]);
        for dir in &directories {
            let kind = if dir.user_dir { "user" } else { "system" };
            let state = match dir.state {
                DirectoryState::Uninitialized => "uninitialized",
                DirectoryState::Listing => "listing",
                DirectoryState::Ready => "ready",
            };
            let path = if dir.path.is_dir() {
                dir.path.display().to_string()
            } else {
                theme.dim.apply_to(format!("{} (missing)", dir.path.display())).to_string()
            };
            table.add_row(vec![
                dir.id.to_string(),
                kind.to_string(),
                state.to_string(),
                dir.entries.to_string(),
                path,
            ]);
        }

        for line in table.render_lines() {
            ui.message(&line);
        }

        Ok(CommandResult::success())
    }
}
