//! Creating new files from templates.
//!
//! Creation resolves a handler, copies the template's backing file to the
//! destination, then launches the handler on the destination.
//!
//! # Example
//!
//! ```no_run
//! use stencil::config::RegistryConfig;
//! use stencil::create::FileCreator;
//! use stencil::mime::MimeType;
//! use stencil::registry::TemplateRegistry;
//! use std::path::Path;
//!
//! let registry = TemplateRegistry::from_config(&RegistryConfig::default());
//! registry.populate();
//!
//! if let Some(template) = registry.find(&MimeType::new("text/plain")) {
//!     let creator = FileCreator::for_registry(&registry);
//!     creator.create(&template, Path::new("/tmp/notes.txt")).unwrap();
//! }
//! ```

pub mod launch;

pub use launch::{expand_exec, shell_quote, Handler, Launcher, SystemLauncher};

use crate::error::{Result, StencilError};
use crate::mime::MimeService;
use crate::registry::{Template, TemplateRegistry};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Result of a successful creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Created {
    pub destination: PathBuf,
    /// Template contents were copied; false for metadata-only templates
    /// and missing backing files.
    pub copied: bool,
    pub handler: Handler,
}

/// Creates files from templates.
pub struct FileCreator {
    mime: Arc<dyn MimeService>,
    launcher: Arc<dyn Launcher>,
}

impl FileCreator {
    pub fn new(mime: Arc<dyn MimeService>) -> Self {
        Self::with_launcher(mime, Arc::new(SystemLauncher))
    }

    pub fn with_launcher(mime: Arc<dyn MimeService>, launcher: Arc<dyn Launcher>) -> Self {
        Self { mime, launcher }
    }

    /// A creator using the registry's MIME service.
    pub fn for_registry(registry: &TemplateRegistry) -> Self {
        Self::new(registry.shared_mime_service())
    }

    /// The template's own command, else the type's default application.
    pub fn resolve_handler(&self, template: &Template) -> Result<Handler> {
        if let Some(command) = template.command() {
            return Ok(Handler::Command(command));
        }

        self.mime
            .default_application(template.mime_type())
            .map(Handler::Application)
            .ok_or_else(|| StencilError::NoHandler {
                mime_type: template.mime_type().to_string(),
            })
    }

    /// Create `destination` from `template` and open it with its handler.
    pub fn create(&self, template: &Template, destination: &Path) -> Result<Created> {
        let handler = self.resolve_handler(template)?;
        let copied = copy_contents(template.file().as_deref(), destination)?;
        self.launcher.launch(&handler, destination)?;

        tracing::info!(
            mime_type = %template.mime_type(),
            destination = %destination.display(),
            copied,
            "created file from template"
        );

        Ok(Created {
            destination: destination.to_path_buf(),
            copied,
            handler,
        })
    }
}

/// Copy a template's backing file to `destination`.
///
/// Returns false when there is nothing to copy. An existing destination is
/// never overwritten.
fn copy_contents(source: Option<&Path>, destination: &Path) -> Result<bool> {
    let Some(source) = source else {
        return Ok(false);
    };

    let copy_failed = |e: io::Error| StencilError::CopyFailed {
        from: source.to_path_buf(),
        to: destination.to_path_buf(),
        source: e,
    };

    let metadata = match fs::metadata(source) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %source.display(), "template file not found; skipping copy");
            return Ok(false);
        }
        Err(e) => return Err(copy_failed(e)),
    };

    if metadata.is_dir() {
        fs::create_dir(destination).map_err(copy_failed)?;
        return Ok(true);
    }

    let mut input = match File::open(source) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(copy_failed(e)),
    };
    let mut output = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(destination)
        .map_err(copy_failed)?;
    io::copy(&mut input, &mut output).map_err(copy_failed)?;

    Ok(true)
}
