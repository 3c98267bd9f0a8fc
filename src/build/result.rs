//! Build result types.
//!
//! Contains types for representing the outcome of build operations.

use std::path::PathBuf;
use std::time::Duration;

/// Status of a single build target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStatus {
    /// Every job ran
    Success,
    /// Jobs were planned but not run (dry run)
    Planned,
    /// A job failed
    Failed(String),
}

impl BuildStatus {
    /// Check if the status indicates success.
    pub fn is_success(&self) -> bool {
        matches!(self, BuildStatus::Success | BuildStatus::Planned)
    }

    /// Check if the status indicates failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, BuildStatus::Failed(_))
    }
}

impl std::fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildStatus::Success => write!(f, "success"),
            BuildStatus::Planned => write!(f, "planned"),
            BuildStatus::Failed(err) => write!(f, "failed: {}", err),
        }
    }
}

/// Result of building a single target.
#[derive(Debug, Clone)]
pub struct TargetResult {
    /// Target name
    pub target: String,
    /// Build status
    pub status: BuildStatus,
    /// Ids of the jobs run, in order (`stage:target_suffix`)
    pub jobs: Vec<String>,
    /// Final output files (readable and minified variants)
    pub outputs: Vec<PathBuf>,
    /// Build duration
    pub duration: Duration,
}

impl TargetResult {
    /// Create a successful result.
    pub fn success(
        target: String,
        jobs: Vec<String>,
        outputs: Vec<PathBuf>,
        duration: Duration,
    ) -> Self {
        Self { target, status: BuildStatus::Success, jobs, outputs, duration }
    }

    /// Create a planned (dry run) result.
    pub fn planned(target: String, jobs: Vec<String>, outputs: Vec<PathBuf>) -> Self {
        Self { target, status: BuildStatus::Planned, jobs, outputs, duration: Duration::ZERO }
    }

    /// Create a failed result, keeping the ids of jobs that did run.
    pub fn failed(target: String, error: String, jobs: Vec<String>, duration: Duration) -> Self {
        Self { target, status: BuildStatus::Failed(error), jobs, outputs: vec![], duration }
    }

    /// Check if this result is successful.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Result of a complete build run.
#[derive(Debug, Default)]
pub struct BuildResult {
    /// Results for each target
    pub targets: Vec<TargetResult>,
    /// Total build duration
    pub total_duration: Duration,
}

impl BuildResult {
    /// Create a new empty build result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a target result.
    pub fn add_result(&mut self, result: TargetResult) {
        self.targets.push(result);
    }

    /// Set the total duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.total_duration = duration;
        self
    }

    /// Get the number of successful targets.
    pub fn success_count(&self) -> usize {
        self.targets.iter().filter(|r| matches!(r.status, BuildStatus::Success)).count()
    }

    /// Get the number of planned targets.
    pub fn planned_count(&self) -> usize {
        self.targets.iter().filter(|r| matches!(r.status, BuildStatus::Planned)).count()
    }

    /// Get the number of failed targets.
    pub fn failed_count(&self) -> usize {
        self.targets.iter().filter(|r| r.status.is_failure()).count()
    }

    /// Check if the overall build succeeded (no failures).
    pub fn is_success(&self) -> bool {
        self.failed_count() == 0
    }

    /// Get all outputs produced.
    pub fn all_outputs(&self) -> Vec<&PathBuf> {
        self.targets.iter().flat_map(|r| r.outputs.iter()).collect()
    }

    /// Get all job ids, in run order.
    pub fn all_jobs(&self) -> Vec<&String> {
        self.targets.iter().flat_map(|r| r.jobs.iter()).collect()
    }

    /// Get failed target results.
    pub fn failures(&self) -> Vec<&TargetResult> {
        self.targets.iter().filter(|r| r.status.is_failure()).collect()
    }

    /// Format a summary of the build result.
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();

        let success = self.success_count();
        let planned = self.planned_count();
        let failed = self.failed_count();
        let total = self.targets.len();
        let jobs = self.all_jobs().len();

        if failed > 0 {
            lines.push(format!(
                "Build failed: {} succeeded, {} failed ({} total)",
                success, failed, total
            ));
            for target in self.failures() {
                lines.push(format!("  - {}: {}", target.target, target.status));
            }
        } else if planned > 0 {
            lines.push(format!("Dry run: {} jobs planned for {} targets", jobs, planned));
        } else {
            lines.push(format!(
                "Build succeeded: {} targets, {} jobs in {:?}",
                success, jobs, self.total_duration
            ));
        }

        lines.join("\n")
    }
}
