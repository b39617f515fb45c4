//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{Cli, Commands};
use crate::config::RegistryConfig;
use crate::create::FileCreator;
use crate::error::Result;
use crate::registry::TemplateRegistry;
use crate::ui::UserInterface;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    config: RegistryConfig,
    registry: TemplateRegistry,
}

impl CommandDispatcher {
    /// Create a dispatcher over the directories `config` selects.
    pub fn new(config: RegistryConfig) -> Self {
        let registry = TemplateRegistry::from_config(&config);
        Self::with_registry(config, registry)
    }

    pub fn with_registry(config: RegistryConfig, registry: TemplateRegistry) -> Self {
        Self { config, registry }
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Dispatch and execute a command.
    ///
    /// One-shot commands list every directory synchronously first; `watch`
    /// populates in the background instead.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if !matches!(cli.command, Commands::Watch) {
            self.registry.populate();
        }

        match &cli.command {
            Commands::List(args) => {
                let cmd = super::list::ListCommand::new(self.registry.clone(), args.clone());
                cmd.execute(ui)
            }
            Commands::Show(args) => {
                let cmd = super::show::ShowCommand::new(self.registry.clone(), args.clone());
                cmd.execute(ui)
            }
            Commands::Create(args) => {
                let creator = FileCreator::for_registry(&self.registry);
                let cmd =
                    super::create::CreateCommand::new(self.registry.clone(), creator, args.clone());
                cmd.execute(ui)
            }
            Commands::Dirs => {
                let cmd = super::dirs::DirsCommand::new(self.registry.clone());
                cmd.execute(ui)
            }
            Commands::Watch => {
                let cmd = super::watch::WatchCommand::new(self.registry.clone(), self.config.watch);
                cmd.execute(ui)
            }
        }
    }
}
