//! Configuration schema types for `cssglue.toml`
//!
//! Defines the structure and validation rules for cssglue project configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::build::OptionsLayer;

/// One group of sources glued into a single destination
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileGroupConfig {
    /// Base directory the `src` patterns are relative to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
    /// Glob patterns for source stylesheets, in concatenation order
    #[serde(default)]
    pub src: Vec<String>,
    /// Destination, with or without the `.css` / `.min.css` extension
    pub dest: PathBuf,
}

/// A named build target
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Options for this target, laid over the task-level `[options]`
    #[serde(default)]
    pub options: OptionsLayer,
    /// File groups built by this target
    #[serde(default)]
    pub files: Vec<FileGroupConfig>,
}

/// External preprocessor commands.
///
/// Each command is a program followed by its arguments. `{src}` and `{dest}`
/// are replaced with the job's input and output paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// LESS compiler command
    #[serde(default = "default_less_command")]
    pub less: Vec<String>,
    /// Sass compiler command
    #[serde(default = "default_sass_command")]
    pub sass: Vec<String>,
}

fn default_less_command() -> Vec<String> {
    vec!["lessc".to_string(), "{src}".to_string(), "{dest}".to_string()]
}

fn default_sass_command() -> Vec<String> {
    vec![
        "sass".to_string(),
        "--no-source-map".to_string(),
        "--style=expanded".to_string(),
        "{src}".to_string(),
        "{dest}".to_string(),
    ]
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self { less: default_less_command(), sass: default_sass_command() }
    }
}

/// Complete cssglue.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlueConfig {
    /// Task-level options shared by every target
    #[serde(default)]
    pub options: OptionsLayer,
    /// Build targets by name
    #[serde(default)]
    pub targets: BTreeMap<String, TargetConfig>,
    /// External tool commands
    #[serde(default)]
    pub tools: ToolsConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "targets.app.files[0].dest")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cssglue.toml: '{}' {}", self.field, self.message)
    }
}

impl GlueConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.targets.is_empty() {
            errors.push(ConfigValidationError {
                field: "targets".to_string(),
                message: "must define at least one target".to_string(),
            });
        }

        for (name, target) in &self.targets {
            if name.is_empty() || name.contains(':') {
                errors.push(ConfigValidationError {
                    field: format!("targets.{}", name),
                    message: "name must be non-empty and must not contain ':'".to_string(),
                });
            }

            for (ix, group) in target.files.iter().enumerate() {
                if group.dest.as_os_str().is_empty() {
                    errors.push(ConfigValidationError {
                        field: format!("targets.{}.files[{}].dest", name, ix),
                        message: "must be a non-empty path".to_string(),
                    });
                }
            }
        }

        if self.tools.less.is_empty() {
            errors.push(ConfigValidationError {
                field: "tools.less".to_string(),
                message: "must name a program".to_string(),
            });
        }
        if self.tools.sass.is_empty() {
            errors.push(ConfigValidationError {
                field: "tools.sass".to_string(),
                message: "must name a program".to_string(),
            });
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Options for a target: task-level options with the target's laid over.
    pub fn target_options(&self, target: &TargetConfig) -> OptionsLayer {
        self.options.overlay(&target.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_parse() {
        let toml = r#"
[[targets.app.files]]
src = ["css/*.css"]
dest = "dist/app"
"#;
        let config: GlueConfig = toml::from_str(toml).unwrap();
        let app = config.targets.get("app").unwrap();
        assert_eq!(app.files.len(), 1);
        assert_eq!(app.files[0].dest, PathBuf::from("dist/app"));
        assert!(app.files[0].cwd.is_none());
        assert_eq!(config.tools, ToolsConfig::default());
        assert!(config.is_valid());
    }

    #[test]
    fn test_full_config_parse() {
        let toml = r#"
[options]
temp_dir = ".tmp"
banner = "/*! site */"

[targets.app.options]
output = "minified"
bannerOn = "minified"

[targets.app.options.concat]
separator = "\n\n"

[[targets.app.files]]
cwd = "assets"
src = ["css/reset.css", "less/main.less"]
dest = "dist/app"

[[targets.app.files]]
src = []
dest = "dist/empty"

[targets.print]
files = [{ src = ["print.scss"], dest = "dist/print.css" }]

[tools]
less = ["npx", "lessc", "{src}", "{dest}"]
"#;
        let config: GlueConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.options.temp_dir, Some(PathBuf::from(".tmp")));

        let app = config.targets.get("app").unwrap();
        assert_eq!(app.options.output.as_deref(), Some("minified"));
        assert_eq!(app.options.banner_on.as_deref(), Some("minified"));
        assert_eq!(app.options.concat.get_str("separator"), Some("\n\n"));
        assert_eq!(app.files[0].cwd, Some(PathBuf::from("assets")));
        assert_eq!(app.files[0].src.len(), 2);
        assert!(app.files[1].src.is_empty());

        assert_eq!(config.targets.get("print").unwrap().files[0].src, vec!["print.scss"]);
        assert_eq!(config.tools.less[0], "npx");
        assert_eq!(config.tools.sass, default_sass_command());
    }

    #[test]
    fn test_target_options_overlay_task_options() {
        let toml = r#"
[options]
banner = "task"
output = "clean"

[targets.app.options]
banner = "app"

[[targets.app.files]]
dest = "out"
"#;
        let config: GlueConfig = toml::from_str(toml).unwrap();
        let merged = config.target_options(config.targets.get("app").unwrap());
        assert_eq!(merged.banner.as_deref(), Some("app"));
        assert_eq!(merged.output.as_deref(), Some("clean"));
    }

    #[test]
    fn test_validation_no_targets() {
        let config: GlueConfig = toml::from_str("").unwrap();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "targets");
    }

    #[test]
    fn test_validation_bad_target_name() {
        let toml = r#"
[targets."a:b"]
files = [{ dest = "out" }]
"#;
        let config: GlueConfig = toml::from_str(toml).unwrap();
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.field == "targets.a:b"));
    }

    #[test]
    fn test_validation_empty_dest() {
        let toml = r#"
[[targets.app.files]]
src = ["a.css"]
dest = ""
"#;
        let config: GlueConfig = toml::from_str(toml).unwrap();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "targets.app.files[0].dest");
        assert!(errors[0].to_string().starts_with("cssglue.toml:"));
    }

    #[test]
    fn test_validation_empty_tool() {
        let toml = r#"
[[targets.app.files]]
dest = "out"

[tools]
sass = []
"#;
        let config: GlueConfig = toml::from_str(toml).unwrap();
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.field == "tools.sass"));
    }
}
