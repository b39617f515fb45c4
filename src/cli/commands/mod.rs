//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait and is routed to by
//! [`CommandDispatcher`], which loads the configuration and builds the
//! registry once for all of them.

pub mod create;
pub mod dirs;
pub mod dispatcher;
pub mod list;
pub mod show;
pub mod watch;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
