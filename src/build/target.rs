//! Build target definitions.
//!
//! A build target is a named set of file groups. Each group glues its sources
//! into one destination.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use glob::{glob, Pattern};

use crate::build::BuildError;
use crate::config::{resolve_path, FileGroupConfig, TargetConfig};

/// Sources glued into a single destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGroup {
    /// Source paths, in concatenation order
    pub sources: Vec<PathBuf>,
    /// Declared destination, before extensions are applied
    pub dest: PathBuf,
    /// Directory sources are joined onto
    pub cwd: Option<PathBuf>,
}

impl FileGroup {
    /// Create a group from sources and a destination.
    pub fn new(sources: Vec<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        Self { sources, dest: dest.into(), cwd: None }
    }

    /// Set the directory sources are joined onto.
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Source path with `cwd` applied.
    pub fn resolve_source(&self, source: &Path) -> PathBuf {
        match &self.cwd {
            Some(cwd) => cwd.join(source),
            None => source.to_path_buf(),
        }
    }

    /// Build a group from configuration, expanding glob patterns.
    ///
    /// Patterns are matched relative to `project_root/cwd`. Matches are kept in
    /// pattern order, sorted within a pattern, and a file matched twice is only
    /// kept the first time. The resulting sources and destination are
    /// absolute when `project_root` is.
    pub fn from_config(config: &FileGroupConfig, project_root: &Path) -> Result<Self, BuildError> {
        let base = match &config.cwd {
            Some(cwd) => resolve_path(project_root, cwd),
            None => project_root.to_path_buf(),
        };

        let mut seen = BTreeSet::new();
        let mut sources = Vec::new();
        // the base directory is literal; only the configured pattern is glob syntax
        let escaped_base = PathBuf::from(Pattern::escape(&base.to_string_lossy()));
        for pattern in &config.src {
            let full = resolve_path(&escaped_base, Path::new(pattern));
            let full_str = full.to_string_lossy();
            let paths = glob(&full_str).map_err(|source| BuildError::Pattern {
                pattern: pattern.clone(),
                source,
            })?;

            let mut matched = Vec::new();
            for entry in paths {
                match entry {
                    Ok(path) => matched.push(path),
                    Err(e) => tracing::warn!(pattern = %pattern, "skipping unreadable path: {}", e),
                }
            }
            matched.sort();
            if matched.is_empty() {
                tracing::warn!(pattern = %pattern, "source pattern matched no files");
            }
            for path in matched {
                if seen.insert(path.clone()) {
                    sources.push(path);
                }
            }
        }

        Ok(Self { sources, dest: resolve_path(project_root, &config.dest), cwd: None })
    }
}

/// A named unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTarget {
    /// Target name, unique within a run
    pub name: String,
    /// File groups, built in order
    pub files: Vec<FileGroup>,
}

impl BuildTarget {
    /// Create a target.
    pub fn new(name: impl Into<String>, files: Vec<FileGroup>) -> Self {
        Self { name: name.into(), files }
    }

    /// Build a target from configuration.
    pub fn from_config(
        name: &str,
        config: &TargetConfig,
        project_root: &Path,
    ) -> Result<Self, BuildError> {
        let files = config
            .files
            .iter()
            .map(|group| FileGroup::from_config(group, project_root))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(name, files))
    }

    /// Check if this target matches a filter string.
    ///
    /// Supports exact names and `*` as a wildcard for every target.
    pub fn matches_filter(&self, filter: &str) -> bool {
        filter == "*" || self.name == filter
    }
}

/// The targets of a run, in build order.
#[derive(Debug, Default)]
pub struct BuildPlan {
    targets: Vec<BuildTarget>,
}

impl BuildPlan {
    /// Create a new empty build plan.
    pub fn new() -> Self {
        Self { targets: vec![] }
    }

    /// Add a target to the plan.
    pub fn add_target(&mut self, target: BuildTarget) {
        self.targets.push(target);
    }

    /// Get all targets in the plan.
    pub fn targets(&self) -> &[BuildTarget] {
        &self.targets
    }

    /// Get the number of targets in the plan.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Check if the plan is empty.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Keep only targets matching one of the patterns.
    ///
    /// A pattern that matches nothing is an error, so typos in target names
    /// do not silently build nothing.
    pub fn filter(mut self, patterns: &[String]) -> Result<Self, BuildError> {
        if patterns.is_empty() {
            return Ok(self);
        }

        if let Some(unknown) =
            patterns.iter().find(|p| !self.targets.iter().any(|t| t.matches_filter(p)))
        {
            return Err(BuildError::UnknownTarget(unknown.clone()));
        }

        self.targets.retain(|t| patterns.iter().any(|p| t.matches_filter(p)));
        Ok(self)
    }
}
