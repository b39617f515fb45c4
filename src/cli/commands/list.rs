//! List command implementation.
//!
//! The `stencil list` command lists active templates.

use serde::Serialize;
use std::path::PathBuf;

use crate::cli::args::ListArgs;
use crate::error::Result;
use crate::registry::{Template, TemplateRegistry};
use crate::ui::{Table, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// Everything a template reports, in display form.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct TemplateSummary {
    pub mime_type: String,
    pub label: Option<String>,
    pub name: Option<String>,
    pub stem: Option<String>,
    pub icon: String,
    pub prompt: Option<String>,
    pub command: Option<String>,
    pub file: Option<PathBuf>,
    pub active: bool,
    pub user_dir: bool,
    pub directory: bool,
}

impl TemplateSummary {
    pub(crate) fn of(template: &Template) -> Self {
        let attributes = template.attributes();
        let (name, stem) = match template.name() {
            Some(n) => (Some(n.basename), Some(n.stem)),
            None => (None, None),
        };
        Self {
            mime_type: template.mime_type().to_string(),
            label: attributes.label,
            name,
            stem,
            icon: template.icon().to_string(),
            prompt: attributes.prompt,
            command: attributes.command,
            file: attributes.file,
            active: !attributes.inactive,
            user_dir: attributes.user_dir,
            directory: template.is_directory(),
        }
    }

    /// Label for menus: the declared label, else the suggested file stem,
    /// else the MIME type.
    pub(crate) fn display_label(&self) -> String {
        self.label
            .clone()
            .or_else(|| self.stem.clone())
            .unwrap_or_else(|| self.mime_type.clone())
    }

    pub(crate) fn source(&self) -> &'static str {
        if self.user_dir {
            "user"
        } else {
            "system"
        }
    }
}

/// The list command implementation.
pub struct ListCommand {
    registry: TemplateRegistry,
    args: ListArgs,
}

impl ListCommand {
    pub fn new(registry: TemplateRegistry, args: ListArgs) -> Self {
        Self { registry, args }
    }

    fn summaries(&self) -> Vec<TemplateSummary> {
        let mut summaries: Vec<_> = self
            .registry
            .list(self.args.user_only)
            .iter()
            .map(|t| TemplateSummary::of(t))
            .collect();
        summaries.sort_by(|a, b| {
            a.display_label()
                .to_lowercase()
                .cmp(&b.display_label().to_lowercase())
                .then_with(|| a.mime_type.cmp(&b.mime_type))
        });
        summaries
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let summaries = self.summaries();

        if self.args.json {
            let json = serde_json::to_string_pretty(&summaries).map_err(anyhow::Error::from)?;
            ui.data(&json);
            return Ok(CommandResult::success());
        }

        if summaries.is_empty() {
            ui.warning("No templates found. Add files to your Templates directory.");
            return Ok(CommandResult::success());
        }

        let theme = ui.theme().clone();
        let mut table = Table::new(&["LABEL", "MIME TYPE", "FILE", "SOURCE"]);
        for summary in &summaries {
            table.add_row(vec![
                theme.highlight.apply_to(summary.display_label()).to_string(),
                theme.mime.apply_to(&summary.mime_type).to_string(),
                summary.name.clone().unwrap_or_else(|| "-".to_string()),
                theme.dim.apply_to(summary.source()).to_string(),
            ]);
        }

        for line in table.render_lines() {
            ui.message(&line);
        }

        Ok(CommandResult::success())
    }
}
