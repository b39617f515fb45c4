//! Live registry of file templates.
//!
//! Template files live in a fixed set of directories. Each file is
//! classified to a MIME type, and all files of one type are merged into a
//! single [`Template`]:
//! - plain files are template content themselves
//! - `.desktop` entries describe a template (label, icon, prompt, command)
//!   and may point at the content file through their `URL` key
//!
//! # Priority
//!
//! Directories are ranked least relevant first:
//! 1. System data dirs
//! 2. User data dir
//! 3. User "Templates" directory
//!
//! Within one directory a desktop entry outranks a plain file. When entries
//! disagree, the most relevant one wins attribute by attribute.
//!
//! # Example
//!
//! ```no_run
//! use stencil::config::RegistryConfig;
//! use stencil::registry::TemplateRegistry;
//!
//! let registry = TemplateRegistry::from_config(&RegistryConfig::default());
//! registry.populate();
//!
//! for template in registry.list(false) {
//!     println!("{}", template.mime_type());
//! }
//! ```

pub mod directory;
mod entry;
mod index;
pub mod resolver;
pub mod template;
pub mod watch;

// Re-exports
pub use directory::{
    is_desktop_entry_name, list_directory, ChangeKind, DirId, DirectoryChange, DirectoryInfo,
    DirectorySpec, DirectoryState, ListedFile,
};
pub use entry::DesktopContribution;
pub use index::TemplateChange;
pub use resolver::TemplateRegistry;
pub use template::{Template, TemplateAttributes, TemplateName};
pub use watch::RegistryMonitor;
