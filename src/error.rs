//! Error types for stencil operations.
//!
//! This module defines [`StencilError`], the error type used throughout the
//! crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Classification and desktop-entry parse failures never reach callers of
//!   the registry query API; the offending file is logged and skipped
//! - Creating a file from a template surfaces typed errors
//! - Use `anyhow::Error` (via `StencilError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for stencil operations.
#[derive(Debug, Error)]
pub enum StencilError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A desktop entry could not be parsed.
    #[error("Problem loading desktop entry {path}: {message}")]
    DesktopEntryParse { path: PathBuf, message: String },

    /// No template is registered for the MIME type.
    #[error("Unknown template: {mime_type}")]
    UnknownTemplate { mime_type: String },

    /// Neither an explicit command nor a default application exists.
    #[error("No default application is set for MIME type {mime_type}")]
    NoHandler { mime_type: String },

    /// Copying the template contents to the destination failed.
    #[error("Failed to copy {from} to {to}: {source}")]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The handler application could not be started.
    #[error("Failed to launch '{command}': {message}")]
    LaunchFailed { command: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for stencil operations.
pub type Result<T> = std::result::Result<T, StencilError>;
