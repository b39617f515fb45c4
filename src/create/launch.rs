//! Launching the handler of a newly created file.

use crate::error::{Result, StencilError};
use crate::mime::Application;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;

/// What opens a newly created file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handler {
    /// Command line declared by the template (`Exec` key).
    Command(String),
    /// The MIME type's default application.
    Application(Application),
}

impl Handler {
    /// The shell command line that opens `target`.
    pub fn command_line(&self, target: &Path) -> String {
        match self {
            Handler::Command(exec) => expand_exec(exec, target),
            Handler::Application(app) => expand_exec(&app.exec, target),
        }
    }

    /// Short description for messages.
    pub fn describe(&self) -> String {
        match self {
            Handler::Command(exec) => exec.clone(),
            Handler::Application(app) => app.name.clone().unwrap_or_else(|| app.id.clone()),
        }
    }
}

/// Starts handlers.
pub trait Launcher: Send + Sync {
    fn launch(&self, handler: &Handler, target: &Path) -> Result<()>;
}

/// Runs handlers through `/bin/sh -c` without waiting for them.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn launch(&self, handler: &Handler, target: &Path) -> Result<()> {
        let command = handler.command_line(target);
        tracing::debug!(command = %command, "launching handler");

        let mut child = Command::new("/bin/sh")
            .arg("-c")
            .arg(&command)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| StencilError::LaunchFailed {
                command: command.clone(),
                message: e.to_string(),
            })?;

        // reap the child once it exits
        thread::spawn(move || {
            let _ = child.wait();
        });

        Ok(())
    }
}

/// Expand desktop-entry field codes in `exec` for a single file.
///
/// `%f`, `%F`, `%u` and `%U` become the quoted path and `%%` a literal
/// `%`. Other field codes are dropped. Without any file code the path is
/// appended.
pub fn expand_exec(exec: &str, target: &Path) -> String {
    let quoted = shell_quote(&target.to_string_lossy());
    let mut expanded = String::with_capacity(exec.len() + quoted.len());
    let mut substituted = false;

    let mut chars = exec.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            expanded.push(c);
            continue;
        }
        match chars.next() {
            Some('f' | 'F' | 'u' | 'U') => {
                expanded.push_str(&quoted);
                substituted = true;
            }
            Some('%') => expanded.push('%'),
            _ => {}
        }
    }

    let mut expanded = expanded.trim_end().to_string();
    if !substituted {
        expanded.push(' ');
        expanded.push_str(&quoted);
    }
    expanded
}

/// Quote `value` for POSIX `sh`.
pub fn shell_quote(value: &str) -> String {
    let safe = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_@%+=:,./-".contains(c));
    if safe {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}
