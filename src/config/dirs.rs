//! XDG directory discovery.
//!
//! Template directories, least relevant first:
//! 1. `<dir>/templates` for each system data dir that exists, in reverse
//!    `$XDG_DATA_DIRS` order (the variable lists the most relevant first)
//! 2. `<user data dir>/templates`
//! 3. the user's "Templates" directory

use crate::config::schema::RegistryConfig;
use crate::registry::DirectorySpec;
use std::path::{Path, PathBuf};

/// Used when `$XDG_DATA_DIRS` is unset or empty.
pub const DEFAULT_SYSTEM_DATA_DIRS: &str = "/usr/local/share:/usr/share";

/// System data directories from `$XDG_DATA_DIRS`, most relevant first.
pub fn system_data_dirs() -> Vec<PathBuf> {
    parse_data_dirs(std::env::var("XDG_DATA_DIRS").ok().as_deref())
}

fn parse_data_dirs(value: Option<&str>) -> Vec<PathBuf> {
    let value = match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => DEFAULT_SYSTEM_DATA_DIRS,
    };

    value
        .split(':')
        .map(PathBuf::from)
        // relative entries are invalid in XDG_DATA_DIRS
        .filter(|p| p.is_absolute())
        .collect()
}

/// The user's data directory (`$XDG_DATA_HOME`, default `~/.local/share`).
pub fn user_data_dir() -> Option<PathBuf> {
    dirs::data_dir()
}

/// The user's "Templates" directory, falling back to `~/Templates`.
pub fn user_templates_dir() -> Option<PathBuf> {
    dirs::template_dir().or_else(|| dirs::home_dir().map(|h| h.join("Templates")))
}

/// Build the list of watched template directories, least relevant first.
pub fn template_directories(config: &RegistryConfig) -> Vec<DirectorySpec> {
    let mut specs = Vec::new();

    let system = config
        .system_data_dirs
        .clone()
        .unwrap_or_else(system_data_dirs);
    for data_dir in system.iter().rev() {
        let path = data_dir.join("templates");
        if path.is_dir() {
            specs.push(DirectorySpec::system(path));
        }
    }

    if let Some(data_dir) = config.user_data_dir.clone().or_else(user_data_dir) {
        specs.push(DirectorySpec::user(data_dir.join("templates")));
    }

    if let Some(templates) = config.templates_dir.clone().or_else(user_templates_dir) {
        if config.create_templates_dir {
            ensure_dir(&templates);
        }
        specs.push(DirectorySpec::user(templates));
    }

    specs
}

fn ensure_dir(path: &Path) {
    if path.exists() {
        return;
    }
    if let Err(e) = std::fs::create_dir_all(path) {
        tracing::debug!(path = %path.display(), "cannot create templates directory: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn parse_data_dirs_defaults_when_unset() {
        assert_eq!(
            parse_data_dirs(None),
            vec![PathBuf::from("/usr/local/share"), PathBuf::from("/usr/share")]
        );
        assert_eq!(parse_data_dirs(Some("")).len(), 2);
    }

    #[test]
    fn parse_data_dirs_skips_relative_entries() {
        assert_eq!(
            parse_data_dirs(Some("/opt/share:relative::/usr/share")),
            vec![PathBuf::from("/opt/share"), PathBuf::from("/usr/share")]
        );
    }

    #[test]
    fn directories_are_ordered_least_relevant_first() {
        let temp = TempDir::new().unwrap();
        let sys_a = temp.path().join("sys_a");
        let sys_b = temp.path().join("sys_b");
        fs::create_dir_all(sys_a.join("templates")).unwrap();
        fs::create_dir_all(sys_b.join("templates")).unwrap();

        let config = RegistryConfig {
            system_data_dirs: Some(vec![sys_a.clone(), sys_b.clone()]),
            user_data_dir: Some(temp.path().join("data")),
            templates_dir: Some(temp.path().join("Templates")),
            ..Default::default()
        };

        let specs = template_directories(&config);
        let paths: Vec<_> = specs.iter().map(|s| s.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                sys_b.join("templates"),
                sys_a.join("templates"),
                temp.path().join("data").join("templates"),
                temp.path().join("Templates"),
            ]
        );
        assert!(!specs[0].user_dir);
        assert!(!specs[1].user_dir);
        assert!(specs[2].user_dir);
        assert!(specs[3].user_dir);
    }

    #[test]
    fn missing_system_dirs_are_skipped() {
        let temp = TempDir::new().unwrap();
        let config = RegistryConfig {
            system_data_dirs: Some(vec![temp.path().join("absent")]),
            user_data_dir: Some(temp.path().join("data")),
            templates_dir: Some(temp.path().join("Templates")),
            create_templates_dir: false,
            ..Default::default()
        };

        let specs = template_directories(&config);
        assert_eq!(specs.len(), 2);
        assert!(specs.iter().all(|s| s.user_dir));
    }

    #[test]
    fn templates_dir_is_created_on_request() {
        let temp = TempDir::new().unwrap();
        let templates = temp.path().join("Templates");
        let config = RegistryConfig {
            system_data_dirs: Some(Vec::new()),
            user_data_dir: Some(temp.path().join("data")),
            templates_dir: Some(templates.clone()),
            create_templates_dir: true,
            ..Default::default()
        };

        template_directories(&config);
        assert!(templates.is_dir());
        // the user data templates dir is watched but never created
        assert!(!temp.path().join("data").join("templates").exists());
    }
}
