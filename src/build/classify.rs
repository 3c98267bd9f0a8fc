//! Source classification by file extension.
//!
//! Every source in a file group is mapped to the processing it needs before
//! concatenation. The mapping is fixed and case-sensitive.

use std::path::Path;

use crate::build::{BuildError, Stage};

/// Extensions accepted as sources, in the order they are reported.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[".css", ".less", ".sass", ".scss"];

/// What has to happen to a source before it can be concatenated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Plain stylesheet, fed to concatenation as is
    PassThrough,
    /// LESS source, compiled by the `less` stage
    Less,
    /// Sass or SCSS source, compiled by the `sass` stage
    Sass,
}

impl SourceKind {
    /// The preprocessing stage for this kind, if any.
    pub fn stage(self) -> Option<Stage> {
        match self {
            SourceKind::PassThrough => None,
            SourceKind::Less => Some(Stage::Less),
            SourceKind::Sass => Some(Stage::Sass),
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::PassThrough => write!(f, "css"),
            SourceKind::Less => write!(f, "less"),
            SourceKind::Sass => write!(f, "sass"),
        }
    }
}

/// Classify a source path by its extension.
///
/// Fails with [`BuildError::UnsupportedSourceKind`] for any extension outside
/// [`SUPPORTED_EXTENSIONS`], including paths without one.
pub fn classify(path: &Path) -> Result<SourceKind, BuildError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("css") => Ok(SourceKind::PassThrough),
        Some("less") => Ok(SourceKind::Less),
        Some("sass") | Some("scss") => Ok(SourceKind::Sass),
        _ => Err(BuildError::UnsupportedSourceKind {
            path: path.to_path_buf(),
            supported: SUPPORTED_EXTENSIONS,
        }),
    }
}
