//! Configuration schema.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Registry configuration, usually read from `~/.config/stencil/config.yml`.
///
/// Every directory setting is optional; unset values come from the XDG
/// environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// System data directories, most relevant first (replaces `$XDG_DATA_DIRS`).
    pub system_data_dirs: Option<Vec<PathBuf>>,

    /// User data directory (replaces `$XDG_DATA_HOME`).
    pub user_data_dir: Option<PathBuf>,

    /// The user's "Templates" directory.
    pub templates_dir: Option<PathBuf>,

    /// Create the templates directory when it does not exist.
    pub create_templates_dir: bool,

    /// Follow live changes in the watched directories.
    pub watch: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            system_data_dirs: None,
            user_data_dir: None,
            templates_dir: None,
            create_templates_dir: true,
            watch: true,
        }
    }
}
