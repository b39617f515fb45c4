//! Create command implementation.
//!
//! The `stencil create <MIME> <DEST>` command copies a template to a new
//! file and opens it.

use crate::cli::args::CreateArgs;
use crate::create::FileCreator;
use crate::error::{Result, StencilError};
use crate::mime::MimeType;
use crate::registry::TemplateRegistry;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The create command implementation.
pub struct CreateCommand {
    registry: TemplateRegistry,
    creator: FileCreator,
    args: CreateArgs,
}

impl CreateCommand {
    pub fn new(registry: TemplateRegistry, creator: FileCreator, args: CreateArgs) -> Self {
        Self {
            registry,
            creator,
            args,
        }
    }
}

impl Command for CreateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mime_type = MimeType::new(&self.args.mime_type);
        let template = self
            .registry
            .find(&mime_type)
            .ok_or_else(|| StencilError::UnknownTemplate {
                mime_type: mime_type.to_string(),
            })?;

        if !template.is_active() {
            ui.warning(&format!("Template for {} is hidden", mime_type));
        }

        let created = match self.creator.create(&template, &self.args.destination) {
            Ok(created) => created,
            Err(StencilError::NoHandler { mime_type }) => {
                ui.error(&format!(
                    "No default application is set for MIME type {}",
                    mime_type
                ));
                return Ok(CommandResult::failure(2));
            }
            Err(e) => return Err(e),
        };

        if !created.copied {
            ui.message("Template has no contents; the handler creates the file.");
        }
        ui.success(&format!(
            "Created {} with {}",
            created.destination.display(),
            created.handler.describe()
        ));

        Ok(CommandResult::success())
    }
}
