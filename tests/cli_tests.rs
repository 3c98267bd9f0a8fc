//! CLI integration tests for the `cssglue` binary.
//!
//! Runs `init`, `check` and `build` against temporary projects and checks
//! output and exit codes.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Get the path to the cssglue binary.
fn cssglue_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_cssglue"))
}

/// Run cssglue in `dir` and return (stdout, stderr, exit code).
fn run_in(dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(cssglue_binary())
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute cssglue");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.code().unwrap_or(-1))
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

const CONFIG: &str = r#"
[options]
temp_dir = ".tmp"
banner = "/*! test */"

[[targets.app.files]]
src = ["styles/*.css"]
dest = "dist/app"

[targets.print.options]
output = "clean"

[[targets.print.files]]
src = ["print.css"]
dest = "dist/print"
"#;

fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "cssglue.toml", CONFIG);
    write(temp.path(), "styles/site.css", "body { margin: 0px; }\n");
    write(temp.path(), "print.css", "nav { display: none; }\n");
    temp
}

// ============================================================================
// init
// ============================================================================

#[test]
fn test_init_writes_starter_config() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("site");

    let (stdout, _, code) = run_in(temp.path(), &["init", dir.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Created"));

    let written = fs::read_to_string(dir.join("cssglue.toml")).unwrap();
    assert!(written.contains("[[targets.app.files]]"));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let temp = project();

    let (_, stderr, code) = run_in(temp.path(), &["init"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("already exists"));
    assert_eq!(fs::read_to_string(temp.path().join("cssglue.toml")).unwrap(), CONFIG);

    let (_, _, code) = run_in(temp.path(), &["init", "--force"]);
    assert_eq!(code, 0);
    assert_ne!(fs::read_to_string(temp.path().join("cssglue.toml")).unwrap(), CONFIG);
}

// ============================================================================
// check
// ============================================================================

#[test]
fn test_check_prints_job_chain() {
    let temp = project();

    let (stdout, stderr, code) = run_in(temp.path(), &["check"]);
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.contains("app (output: both"));
    assert!(stdout.contains("concat:app_000000"));
    assert!(stdout.contains("cssmin:app_000001"));
    assert!(stdout.contains("concat:print_000000"));
    assert!(stdout.contains("Config OK: 3 jobs"));

    // nothing was built
    assert!(!temp.path().join("dist").exists());
}

#[test]
fn test_check_invalid_config() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "cssglue.toml", "[options]\noutput = \"both\"\n");

    let (_, stderr, code) = run_in(temp.path(), &["check"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("at least one target"), "stderr: {stderr}");
}

#[test]
fn test_check_invalid_output_option() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "cssglue.toml",
        "[options]\noutput = \"tiny\"\n\n[[targets.app.files]]\nsrc = []\ndest = \"dist/app\"\n",
    );

    let (_, stderr, code) = run_in(temp.path(), &["check"]);
    assert_eq!(code, 1);
    assert!(stderr.contains(r#"Invalid output option: "tiny""#), "stderr: {stderr}");
}

// ============================================================================
// build
// ============================================================================

#[test]
fn test_build_dry_run_writes_nothing() {
    let temp = project();

    let (stdout, stderr, code) = run_in(temp.path(), &["build", "--dry-run"]);
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.contains("Dry run - would run:"));
    assert!(stdout.contains("cssmin:app_000001"));
    assert!(stdout.contains("Dry run: 3 jobs planned for 2 targets"));
    assert!(!temp.path().join("dist").exists());
}

#[test]
fn test_build_writes_stylesheets() {
    let temp = project();

    let (stdout, stderr, code) = run_in(temp.path(), &["build"]);
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.contains("Build succeeded: 2 targets, 3 jobs"));

    let dist = temp.path().join("dist");
    assert!(dist.join("app.css").exists());
    assert!(dist.join("app.min.css").exists());
    assert!(dist.join("print.css").exists());
    assert!(!dist.join("print.min.css").exists());
}

#[test]
fn test_build_selected_target_with_output_override() {
    let temp = project();

    let (_, stderr, code) = run_in(temp.path(), &["build", "app", "--output", "minified"]);
    assert_eq!(code, 0, "stderr: {stderr}");

    let dist = temp.path().join("dist");
    assert!(dist.join("app.min.css").exists());
    assert!(!dist.join("app.css").exists());
    assert!(!dist.join("print.css").exists());
}

#[test]
fn test_build_from_subdirectory_finds_config() {
    let temp = project();
    let sub = temp.path().join("styles");

    let (_, stderr, code) = run_in(&sub, &["build", "print"]);
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(temp.path().join("dist/print.css").exists());
}

#[test]
fn test_build_unknown_target() {
    let temp = project();

    let (_, stderr, code) = run_in(temp.path(), &["build", "admin"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("admin"));
}

#[test]
fn test_build_invalid_output_argument() {
    let temp = project();

    let (_, stderr, code) = run_in(temp.path(), &["build", "--output", "tiny"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("Valid options"));
}

#[test]
fn test_build_unsupported_source() {
    let temp = project();
    write(temp.path(), "styles/notes.txt", "not css");
    let config = CONFIG.replace(r#"src = ["styles/*.css"]"#, r#"src = ["styles/*"]"#);
    write(temp.path(), "cssglue.toml", &config);

    let (_, stderr, code) = run_in(temp.path(), &["build"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Cannot process source file"), "stderr: {stderr}");
}

#[test]
fn test_build_missing_config_file() {
    let temp = TempDir::new().unwrap();

    let (_, stderr, code) = run_in(temp.path(), &["build", "--config", "nope.toml"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Error loading config"));
}
