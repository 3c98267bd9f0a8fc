//! Build error types.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// Fatal error for a build run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BuildError {
    /// A source file has an extension no stage handles
    #[error(
        "Cannot process source file \"{}\". Only {} files are supported.",
        .path.display(),
        quoted_list(.supported)
    )]
    UnsupportedSourceKind {
        /// Offending source path
        path: PathBuf,
        /// Extensions that are accepted
        supported: &'static [&'static str],
    },

    /// An enumerated option has a value outside its valid set
    #[error("Invalid {field} option: \"{value}\". Valid options: [{}].", quoted_list(.valid))]
    InvalidOptionValue {
        /// Option name
        field: &'static str,
        /// Value found in configuration
        value: String,
        /// Accepted values
        valid: &'static [&'static str],
    },

    /// A job failed in its engine
    #[error("Job {job} failed: {source}")]
    Job {
        /// Id of the failed job
        job: String,
        /// Engine error
        #[source]
        source: ExecuteError,
    },

    /// A target filter names a target that is not configured
    #[error("Unknown target '{0}'")]
    UnknownTarget(String),

    /// A source glob could not be parsed
    #[error("Invalid source pattern '{pattern}': {source}")]
    Pattern {
        /// Pattern as written
        pattern: String,
        /// Parser error
        #[source]
        source: glob::PatternError,
    },

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of a single job inside an engine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExecuteError {
    /// Reading an input or writing the output failed
    #[error("{}: {source}", .path.display())]
    Io {
        /// File being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The stylesheet could not be parsed or printed
    #[error("{}: {message}", .path.display())]
    Css {
        /// Stylesheet being minified
        path: PathBuf,
        /// Parser or printer message
        message: String,
    },

    /// An external tool could not be started or exited unsuccessfully
    #[error("`{program}` {message}")]
    Tool {
        /// Program name
        program: String,
        /// What went wrong
        message: String,
    },

    /// No command is configured for the stage
    #[error("no command configured for stage '{0}'")]
    MissingTool(String),

    /// Stage options could not be serialized for the tool
    #[error("failed to encode options: {0}")]
    Options(#[from] serde_json::Error),
}

fn quoted_list(items: &[&str]) -> String {
    items.iter().map(|i| format!("\"{}\"", i)).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_option_message() {
        let err = BuildError::InvalidOptionValue {
            field: "output",
            value: "tiny".to_string(),
            valid: &["clean", "minified", "both"],
        };
        assert_eq!(
            err.to_string(),
            "Invalid output option: \"tiny\". Valid options: [\"clean\", \"minified\", \"both\"]."
        );
    }

    #[test]
    fn test_unsupported_message() {
        let err = BuildError::UnsupportedSourceKind {
            path: PathBuf::from("style.txt"),
            supported: &[".css", ".less"],
        };
        assert_eq!(
            err.to_string(),
            "Cannot process source file \"style.txt\". Only \".css\", \".less\" files are supported."
        );
    }

    #[test]
    fn test_tool_message() {
        let err = ExecuteError::Tool { program: "lessc".to_string(), message: "exited with 1".to_string() };
        assert_eq!(err.to_string(), "`lessc` exited with 1");
    }
}
