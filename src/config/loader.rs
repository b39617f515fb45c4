//! Configuration file discovery and loading.

use crate::config::schema::RegistryConfig;
use crate::error::{Result, StencilError};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming a configuration file.
pub const CONFIG_ENV: &str = "STENCIL_CONFIG";

/// Default configuration file: `<config dir>/stencil/config.yml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("stencil").join("config.yml"))
}

/// Load the registry configuration.
///
/// Lookup order:
/// 1. `explicit` path (from `--config`)
/// 2. `$STENCIL_CONFIG`
/// 3. [`default_config_path`], if it exists
/// 4. built-in defaults
///
/// # Errors
///
/// Returns `ConfigNotFound` if an explicitly named file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config(explicit: Option<&Path>) -> Result<RegistryConfig> {
    if let Some(path) = explicit {
        return load_config_file(path);
    }

    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
        return load_config_file(Path::new(&path));
    }

    match default_config_path() {
        Some(path) if path.is_file() => load_config_file(&path),
        _ => Ok(RegistryConfig::default()),
    }
}

/// Load a single config file.
pub fn load_config_file(path: &Path) -> Result<RegistryConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StencilError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            StencilError::Io(e)
        }
    })?;

    tracing::debug!(path = %path.display(), "loading configuration");
    parse_config(&content, path)
}

/// Parse YAML content into a [`RegistryConfig`].
///
/// An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<RegistryConfig> {
    if content.trim().is_empty() {
        return Ok(RegistryConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| StencilError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}
