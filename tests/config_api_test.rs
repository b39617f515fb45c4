//! Integration tests for config module public API.

use std::fs;
use stencil::config::{load_config, template_directories, RegistryConfig};
use stencil::registry::TemplateRegistry;
use stencil::StencilError;
use tempfile::TempDir;

#[test]
fn config_file_selects_directories() {
    let temp = TempDir::new().unwrap();
    let system = temp.path().join("share");
    fs::create_dir_all(system.join("templates")).unwrap();
    let config_path = temp.path().join("config.yml");
    fs::write(
        &config_path,
        format!(
            "system_data_dirs: [{}]\nuser_data_dir: {}\ntemplates_dir: {}\ncreate_templates_dir: false\n",
            system.display(),
            temp.path().join("data").display(),
            temp.path().join("Templates").display(),
        ),
    )
    .unwrap();

    let config = load_config(Some(&config_path)).unwrap();
    let specs = template_directories(&config);
    assert_eq!(specs.len(), 3);
    assert_eq!(specs[0].path, system.join("templates"));
    assert!(!specs[0].user_dir);
    assert!(!temp.path().join("Templates").exists());

    let registry = TemplateRegistry::from_config(&config);
    assert_eq!(registry.directories().len(), 3);
}

#[test]
fn missing_explicit_config_is_an_error() {
    let temp = TempDir::new().unwrap();
    let err = load_config(Some(&temp.path().join("nope.yml"))).unwrap_err();
    assert!(matches!(err, StencilError::ConfigNotFound { .. }));
}

#[test]
fn unknown_keys_are_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.yml");
    fs::write(&path, "wach: true\n").unwrap();
    let err = load_config(Some(&path)).unwrap_err();
    assert!(matches!(err, StencilError::ConfigParseError { .. }));
}

#[test]
fn defaults_watch_and_create() {
    let config = RegistryConfig::default();
    assert!(config.watch);
    assert!(config.create_templates_dir);
}
