//! Job descriptors handed to the executor.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::build::OptionBag;

/// A processing stage a job runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// LESS compilation
    Less,
    /// Sass/SCSS compilation
    Sass,
    /// Concatenation into the readable output
    Concat,
    /// Minification into the `.min.css` output
    Cssmin,
}

impl Stage {
    /// Stage name as used in job ids.
    pub fn name(self) -> &'static str {
        match self {
            Stage::Less => "less",
            Stage::Sass => "sass",
            Stage::Concat => "concat",
            Stage::Cssmin => "cssmin",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Input of a job: one file or an ordered list of files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum JobSource {
    /// A single input file
    File(PathBuf),
    /// Several input files, in concatenation order
    Files(Vec<PathBuf>),
}

impl JobSource {
    /// All input paths in order.
    pub fn paths(&self) -> &[PathBuf] {
        match self {
            JobSource::File(p) => std::slice::from_ref(p),
            JobSource::Files(ps) => ps,
        }
    }
}

impl std::fmt::Display for JobSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shown: Vec<String> = self.paths().iter().map(|p| p.display().to_string()).collect();
        write!(f, "{}", shown.join(", "))
    }
}

/// One unit of work in a target's pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobDescriptor {
    /// Stage that runs this job
    pub stage: Stage,
    /// Unique target id, e.g. `app_00002a`
    pub target: String,
    /// Input file(s)
    pub src: JobSource,
    /// Output file
    pub dest: PathBuf,
    /// Stage options
    pub options: OptionBag,
}

impl JobDescriptor {
    /// Create a job descriptor.
    pub fn new(
        stage: Stage,
        target: String,
        src: JobSource,
        dest: PathBuf,
        options: OptionBag,
    ) -> Self {
        Self { stage, target, src, dest, options }
    }

    /// Reportable job id, `<stage>:<target>`.
    pub fn id(&self) -> String {
        format!("{}:{}", self.stage, self.target)
    }

    /// Output path of this job.
    pub fn dest(&self) -> &Path {
        &self.dest
    }
}
