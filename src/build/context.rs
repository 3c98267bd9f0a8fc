//! Build context containing configuration and state for a build.

use crate::build::{BuildError, BuildPlan, BuildTarget, OptionsLayer};
use crate::config::GlueConfig;
use std::path::{Path, PathBuf};

/// Build context containing configuration and paths for a build operation.
///
/// Relative paths in the configuration (sources, destinations, temp
/// directories) are resolved against the project root.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// The loaded configuration
    config: GlueConfig,
    /// Project root directory (where cssglue.toml is located)
    project_root: PathBuf,
    /// Optional filter to build specific targets only
    target_filter: Option<Vec<String>>,
}

impl BuildContext {
    /// Create a new build context.
    ///
    /// # Arguments
    /// - `config` - The loaded configuration
    /// - `project_root` - The project root directory
    pub fn new(config: GlueConfig, project_root: PathBuf) -> Self {
        Self { config, project_root, target_filter: None }
    }

    /// Get the configuration.
    pub fn config(&self) -> &GlueConfig {
        &self.config
    }

    /// Get the project root directory.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Set target filter to build only specific targets.
    pub fn with_filter(mut self, targets: Vec<String>) -> Self {
        self.target_filter = Some(targets);
        self
    }

    /// Get the target filter.
    pub fn target_filter(&self) -> Option<&[String]> {
        self.target_filter.as_deref()
    }

    /// Resolve a path relative to the project root.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        crate::config::resolve_path(&self.project_root, path)
    }

    /// Create the build plan: every configured target, filtered.
    pub fn create_plan(&self) -> Result<BuildPlan, BuildError> {
        let mut plan = BuildPlan::new();
        for (name, target) in &self.config.targets {
            plan.add_target(BuildTarget::from_config(name, target, &self.project_root)?);
        }

        match self.target_filter() {
            Some(filter) => plan.filter(filter),
            None => Ok(plan),
        }
    }

    /// User options for a target: task-level and target-level options merged,
    /// with a relative temp directory resolved against the project root.
    pub fn target_options(&self, name: &str) -> Result<OptionsLayer, BuildError> {
        let target = self
            .config
            .targets
            .get(name)
            .ok_or_else(|| BuildError::UnknownTarget(name.to_string()))?;

        let mut layer = self.config.target_options(target);
        if let Some(temp_dir) = layer.temp_dir.take() {
            layer.temp_dir = Some(self.resolve_path(&temp_dir));
        }
        Ok(layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    fn config() -> GlueConfig {
        parse_config(
            r#"
[options]
temp_dir = ".tmp"
banner = "/* shared */"

[targets.app.options]
output = "clean"

[[targets.app.files]]
src = []
dest = "dist/app"

[targets.print.options]
temp_dir = "/var/tmp/print"

[[targets.print.files]]
src = []
dest = "dist/print"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_build_context_new() {
        let root = PathBuf::from("/project");
        let ctx = BuildContext::new(config(), root.clone());

        assert_eq!(ctx.project_root(), &root);
        assert!(ctx.target_filter().is_none());
        assert_eq!(ctx.config().targets.len(), 2);
    }

    #[test]
    fn test_build_context_with_filter() {
        let ctx = BuildContext::new(config(), PathBuf::from("/project"))
            .with_filter(vec!["app".to_string()]);

        assert_eq!(ctx.target_filter(), Some(&["app".to_string()][..]));
        let plan = ctx.create_plan().unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.targets()[0].name, "app");
    }

    #[test]
    fn test_create_plan_resolves_dest() {
        let ctx = BuildContext::new(config(), PathBuf::from("/project"));
        let plan = ctx.create_plan().unwrap();

        assert_eq!(plan.len(), 2);
        assert_eq!(plan.targets()[0].files[0].dest, PathBuf::from("/project/dist/app"));
    }

    #[test]
    fn test_target_options_resolves_temp_dir() {
        let ctx = BuildContext::new(config(), PathBuf::from("/project"));

        let app = ctx.target_options("app").unwrap();
        assert_eq!(app.temp_dir, Some(PathBuf::from("/project/.tmp")));
        assert_eq!(app.output.as_deref(), Some("clean"));
        assert_eq!(app.banner.as_deref(), Some("/* shared */"));

        let print = ctx.target_options("print").unwrap();
        assert_eq!(print.temp_dir, Some(PathBuf::from("/var/tmp/print")));
    }

    #[test]
    fn test_target_options_unknown() {
        let ctx = BuildContext::new(config(), PathBuf::from("/project"));
        assert!(matches!(ctx.target_options("nope"), Err(BuildError::UnknownTarget(_))));
    }

    #[test]
    fn test_build_context_resolve_path() {
        let ctx = BuildContext::new(config(), PathBuf::from("/project"));
        assert_eq!(ctx.resolve_path(Path::new("/other/path")), PathBuf::from("/other/path"));
        assert_eq!(ctx.resolve_path(Path::new("dist")), PathBuf::from("/project/dist"));
    }
}
