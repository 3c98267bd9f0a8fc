//! Configuration loading and discovery for `cssglue.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::GlueConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up by [`find_config`].
pub const CONFIG_FILE_NAME: &str = "cssglue.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse cssglue.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
    /// No config file could be found
    #[error("No cssglue.toml found in {} or any parent directory", .0.display())]
    NotFound(PathBuf),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override the temp directory for every target
    pub temp_dir: Option<PathBuf>,
    /// Override the output mode for every target
    pub output: Option<String>,
}

/// Find cssglue.toml by walking up from the current working directory.
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(find_config_from)
}

/// Find cssglue.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a cssglue.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file.
///
/// # Returns
/// - `Ok((config, path))` on success
/// - `Err(ConfigError)` if no file is found or it cannot be read, parsed or
///   validated
pub fn load_config(path: Option<&Path>) -> Result<(GlueConfig, PathBuf), ConfigError> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => find_config().ok_or_else(|| {
            ConfigError::NotFound(env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
        })?,
    };

    let config = load_config_file(&config_path)?;
    Ok((config, config_path))
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<GlueConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parse and validate configuration text.
pub fn parse_config(contents: &str) -> Result<GlueConfig, ConfigError> {
    let config: GlueConfig = toml::from_str(contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over both task-level and target-level
/// values, so they are written into every target.
pub fn merge_cli_overrides(config: &mut GlueConfig, overrides: &CliOverrides) {
    for target in config.targets.values_mut() {
        if let Some(ref temp_dir) = overrides.temp_dir {
            target.options.temp_dir = Some(temp_dir.clone());
        }
        if let Some(ref output) = overrides.output {
            target.options.output = Some(output.clone());
        }
    }
}

/// Get the project root directory from a config file path.
///
/// Returns the parent directory of the cssglue.toml file.
pub fn project_root(config_path: &Path) -> Option<&Path> {
    config_path.parent()
}

/// Resolve a path relative to the project root.
///
/// If the path is absolute, returns it unchanged.
/// If relative, joins it with the project root.
pub fn resolve_path(project_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}
