//! Stencil - a live registry of file templates.
//!
//! File managers offer "New Document" menus built from template files kept
//! in a handful of XDG directories. Stencil watches those directories,
//! merges the templates found for each MIME type, and creates new files
//! from them.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and template directory discovery
//! - [`create`] - Creating files from templates
//! - [`desktop`] - Desktop entry parsing
//! - [`error`] - Error types and result aliases
//! - [`mime`] - MIME types, classification and the MIME service
//! - [`registry`] - The template registry and its live monitor
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use stencil::mime::{MimeType, StaticMimeService};
//! use stencil::registry::{DirectorySpec, TemplateRegistry};
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(dir.path().join("Notes.txt"), "").unwrap();
//!
//! let mime = StaticMimeService::new().with_extension("txt", "text/plain");
//! let registry = TemplateRegistry::new(vec![DirectorySpec::user(dir.path())], Arc::new(mime));
//! registry.populate();
//!
//! let template = registry.find(&MimeType::new("text/plain")).unwrap();
//! assert_eq!(template.name().unwrap().stem, "Notes");
//! ```

pub mod cli;
pub mod config;
pub mod create;
pub mod desktop;
pub mod error;
pub mod mime;
pub mod registry;
pub mod ui;

pub use error::{Result, StencilError};
