//! Show command implementation.
//!
//! The `stencil show <MIME>` command prints every attribute of one template,
//! including inactive ones.

use crate::cli::args::ShowArgs;
use crate::error::{Result, StencilError};
use crate::mime::MimeType;
use crate::registry::TemplateRegistry;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::list::TemplateSummary;

/// The show command implementation.
pub struct ShowCommand {
    registry: TemplateRegistry,
    args: ShowArgs,
}

impl ShowCommand {
    pub fn new(registry: TemplateRegistry, args: ShowArgs) -> Self {
        Self { registry, args }
    }
}

impl Command for ShowCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mime_type = MimeType::new(&self.args.mime_type);
        let template = self
            .registry
            .find(&mime_type)
            .ok_or_else(|| StencilError::UnknownTemplate {
                mime_type: mime_type.to_string(),
            })?;
        let summary = TemplateSummary::of(&template);

        if self.args.json {
            let json = serde_json::to_string_pretty(&summary).map_err(anyhow::Error::from)?;
            ui.data(&json);
            return Ok(CommandResult::success());
        }

        let theme = ui.theme().clone();
        let optional = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());

        let fields = [
            ("MIME type", theme.mime.apply_to(&summary.mime_type).to_string()),
            ("Label", optional(summary.label.clone())),
            ("Name", optional(summary.name.clone())),
            ("Stem", optional(summary.stem.clone())),
            ("Icon", summary.icon.clone()),
            ("Prompt", optional(summary.prompt.clone())),
            ("Command", optional(summary.command.clone())),
            (
                "File",
                optional(summary.file.as_ref().map(|f| f.display().to_string())),
            ),
            ("Source", summary.source().to_string()),
            ("Active", summary.active.to_string()),
            ("Directory", summary.directory.to_string()),
        ];

        for (key, value) in fields {
            ui.message(&theme.format_field(key, &value));
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

    fn setup(temp: &TempDir) -> TemplateRegistry {
        fs::write(temp.path().join("code.py"), "").unwrap();
        fs::write(
            temp.path().join("E.desktop"),
            "[Desktop Entry]\nName=Python Script\nComment=Name your script\nURL=code.py\nIcon=python\n",
        )
        .unwrap();
        fs::write(
            temp.path().join("gone.desktop"),
            "[Desktop Entry]\nMimeType=text/x-gone\nHidden=true\n",
        )
        .unwrap();
        let mime = StaticMimeService::new().with_extension("py", "text/x-python");
        let registry =
            TemplateRegistry::new(vec![DirectorySpec::user(temp.path())], Arc::new(mime));
        registry.populate();
        registry
    }

    fn args(mime_type: &str) -> ShowArgs {
        ShowArgs {
            mime_type: mime_type.to_string(),
            json: false,
        }
    }

    #[test]
    fn show_prints_merged_attributes() {
        let temp = TempDir::new().unwrap();
        let registry = setup(&temp);
        let mut ui = MockUI::new();

        let result = ShowCommand::new(registry, args("text/x-python"))
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(ui.has_message("Label: Python Script"));
        assert!(ui.has_message("Prompt: Name your script"));
        assert!(ui.has_message("Name: code.py"));
        assert!(ui.has_message("Stem: code"));
        assert!(ui.has_message("Icon: python"));
        assert!(ui.has_message("Source: user"));
    }

    #[test]
    fn show_inactive_template() {
        let temp = TempDir::new().unwrap();
        let registry = setup(&temp);
        let mut ui = MockUI::new();

        ShowCommand::new(registry, args("text/x-gone"))
            .execute(&mut ui)
            .unwrap();

        assert!(ui.has_message("Active: false"));
        assert!(ui.has_message("Icon: text-x-gone"));
    }

    #[test]
    fn show_unknown_template_fails() {
        let temp = TempDir::new().unwrap();
        let registry = setup(&temp);
        let mut ui = MockUI::new();

        let err = ShowCommand::new(registry, args("image/png"))
            .execute(&mut ui)
            .unwrap_err();
        assert!(matches!(err, StencilError::UnknownTemplate { .. }));
    }
}
