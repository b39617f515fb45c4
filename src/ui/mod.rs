//! Terminal output for the `stencil` binary.
//!
//! - [`UserInterface`] trait so commands can be tested against [`MockUI`]
//! - [`TerminalUI`] writing styled lines to stdout
//! - [`Table`] for column output
//!
//! # Example
//!
//! ```
//! use stencil::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("3 templates");
//! assert_eq!(ui.messages(), ["3 templates"]);
//! ```

pub mod mock;
pub mod output;
pub mod table;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use table::Table;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, StencilTheme};

/// Trait for user interface interactions.
pub trait UserInterface {
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Write raw data (JSON output); shown in every mode but silent.
    fn data(&mut self, data: &str);

    fn success(&mut self, msg: &str);

    fn warning(&mut self, msg: &str);

    /// Display an error message. Errors show in every output mode.
    fn error(&mut self, msg: &str);

    fn theme(&self) -> &StencilTheme;
}
