//! Configuration for the template registry.
//!
//! - [`RegistryConfig`] - which directories to watch and how
//! - [`loader`] - locating and parsing the YAML configuration file
//! - [`dirs`] - XDG directory discovery
//!
//! # Example
//!
//! ```
//! use stencil::config::{parse_config, RegistryConfig};
//! use std::path::Path;
//!
//! let config = parse_config("watch: false\n", Path::new("config.yml")).unwrap();
//! assert!(!config.watch);
//! assert!(config.create_templates_dir);
//! ```

pub mod dirs;
pub mod loader;
pub mod schema;

pub use dirs::{
    system_data_dirs, template_directories, user_data_dir, user_templates_dir,
    DEFAULT_SYSTEM_DATA_DIRS,
};
pub use loader::{default_config_path, load_config, load_config_file, parse_config, CONFIG_ENV};
pub use schema::RegistryConfig;
