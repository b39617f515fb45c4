//! Command-line interface for stencil.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, CreateArgs, ListArgs, ShowArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
