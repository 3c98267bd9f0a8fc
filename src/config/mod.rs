//! Configuration module for cssglue
//!
//! Provides types and parsing for `cssglue.toml` project configuration.

pub mod loader;
pub mod schema;

pub use loader::{
    find_config, find_config_from, load_config, merge_cli_overrides, parse_config, project_root,
    resolve_path, CliOverrides, ConfigError, CONFIG_FILE_NAME,
};
pub use schema::*;
