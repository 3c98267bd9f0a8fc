//! Engines that run jobs against the filesystem.
//!
//! Concatenation and minification are built in; the preprocessors are
//! external programs configured under `[tools]`.

use lightningcss::printer::PrinterOptions;
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, StyleSheet};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::Command;

use crate::build::{ExecuteError, JobDescriptor, JobExecutor, Stage};
use crate::config::ToolsConfig;

/// Environment variable carrying a preprocessor job's options as JSON.
pub const OPTIONS_ENV: &str = "CSSGLUE_OPTIONS";

/// Executor backed by the built-in engines and the configured tools.
///
/// The built-in concat reads `separator`, `banner`, `footer` and
/// `stripBanners`. The built-in cssmin reads `banner`, `report` and
/// `keepSpecialComments`. Other stage keys (`process`, `sourceMap`,
/// `roundingPrecision`, `aggressiveMerging`, `keepBreaks`, ...) are ignored
/// here; only the external preprocessors see their whole option bag, via
/// [`OPTIONS_ENV`].
#[derive(Debug, Clone, Default)]
pub struct EngineExecutor {
    tools: ToolsConfig,
}

impl EngineExecutor {
    /// Create an executor using the given tool commands.
    pub fn new(tools: ToolsConfig) -> Self {
        Self { tools }
    }

    fn concat(&self, job: &JobDescriptor) -> Result<(), ExecuteError> {
        let separator = job.options.get_str("separator").unwrap_or("\n");
        let banner = job.options.get_str("banner").unwrap_or("");
        let footer = job.options.get_str("footer").unwrap_or("");

        let strip = job.options.get_bool("stripBanners") == Some(true);

        let mut parts = job.src.paths().iter().map(|p| read(p)).collect::<Result<Vec<_>, _>>()?;
        if strip {
            for part in &mut parts {
                *part = strip_banner(part).to_string();
            }
        }

        let mut out = String::from(banner);
        out.push_str(&parts.join(separator));
        out.push_str(footer);
        write(&job.dest, &out)
    }

    fn minify(&self, job: &JobDescriptor) -> Result<(), ExecuteError> {
        let parts = job.src.paths().iter().map(|p| read(p)).collect::<Result<Vec<_>, _>>()?;
        let source = parts.join("\n");

        // `keepSpecialComments = 0` drops `/*! ... */` comments from the input
        let keep_special =
            job.options.get("keepSpecialComments").and_then(Value::as_u64) != Some(0);
        let code = minify_css(&source, &job.dest, keep_special)?;
        let out = match job.options.get_str("banner") {
            Some(banner) if !banner.is_empty() => format!("{}\n{}", banner, code),
            _ => code,
        };
        write(&job.dest, &out)?;

        if job.options.get_str("report") == Some("min") {
            tracing::info!(
                "File {} created: {} B → {} B",
                job.dest.display(),
                source.len(),
                out.len()
            );
        }
        Ok(())
    }

    fn run_tool(&self, command: &[String], job: &JobDescriptor) -> Result<(), ExecuteError> {
        let (program, args) =
            command.split_first().ok_or_else(|| ExecuteError::MissingTool(job.stage.to_string()))?;

        let src = job.src.to_string();
        let dest = job.dest.display().to_string();
        let args: Vec<String> =
            args.iter().map(|a| a.replace("{src}", &src).replace("{dest}", &dest)).collect();

        ensure_parent(&job.dest)?;
        let options = serde_json::to_string(&job.options)?;

        tracing::debug!(program = %program, args = ?args, "running preprocessor");
        let output = Command::new(program).args(&args).env(OPTIONS_ENV, options).output().map_err(
            |e| ExecuteError::Tool {
                program: program.clone(),
                message: format!("could not be started: {}", e),
            },
        )?;

        if !output.status.success() {
            let status = match output.status.code() {
                Some(code) => format!("exited with code {}", code),
                None => "was terminated by a signal".to_string(),
            };
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = if stderr.trim().is_empty() {
                status
            } else {
                format!("{}: {}", status, stderr.trim())
            };
            return Err(ExecuteError::Tool { program: program.clone(), message });
        }
        Ok(())
    }
}

impl JobExecutor for EngineExecutor {
    fn execute(&mut self, job: &JobDescriptor) -> Result<(), ExecuteError> {
        match job.stage {
            Stage::Concat => self.concat(job),
            Stage::Cssmin => self.minify(job),
            Stage::Less => self.run_tool(&self.tools.less, job),
            Stage::Sass => self.run_tool(&self.tools.sass, job),
        }
    }
}

/// Minify a stylesheet with lightningcss.
///
/// `/*! ... */` comments at the top of `source` are kept only when
/// `keep_special_comments` is set.
pub fn minify_css(
    source: &str,
    path: &Path,
    keep_special_comments: bool,
) -> Result<String, ExecuteError> {
    let css_error = |message: String| ExecuteError::Css { path: path.to_path_buf(), message };

    let mut stylesheet = StyleSheet::parse(
        source,
        ParserOptions { filename: path.to_string_lossy().into_owned(), ..Default::default() },
    )
    .map_err(|e| css_error(e.to_string()))?;

    if !keep_special_comments {
        stylesheet.license_comments.clear();
    }
    stylesheet.minify(MinifyOptions::default()).map_err(|e| css_error(e.to_string()))?;

    let printed = stylesheet
        .to_css(PrinterOptions { minify: true, ..Default::default() })
        .map_err(|e| css_error(e.to_string()))?;

    Ok(printed.code)
}

/// Remove a leading `/* ... */` comment. `/*! ... */` comments are kept.
fn strip_banner(css: &str) -> &str {
    let trimmed = css.trim_start();
    if trimmed.starts_with("/*") && !trimmed.starts_with("/*!") {
        if let Some(end) = trimmed[2..].find("*/") {
            return trimmed[end + 4..].trim_start();
        }
    }
    css
}

fn read(path: &Path) -> Result<String, ExecuteError> {
    fs::read_to_string(path).map_err(|source| ExecuteError::Io { path: path.to_path_buf(), source })
}

fn ensure_parent(path: &Path) -> Result<(), ExecuteError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .map_err(|source| ExecuteError::Io { path: parent.to_path_buf(), source }),
        _ => Ok(()),
    }
}

fn write(path: &Path, contents: &str) -> Result<(), ExecuteError> {
    ensure_parent(path)?;
    fs::write(path, contents).map_err(|source| ExecuteError::Io { path: path.to_path_buf(), source })
}
