//! Build command implementations (build, check, init)

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::build::{
    resolve, BuildContext, BuildError, BuildPipeline, OutputMode, PipelineBuilder,
    RecordingExecutor, SequentialNamer,
};
use crate::config::{load_config, merge_cli_overrides, CliOverrides, ConfigError, CONFIG_FILE_NAME};

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Config written by `cssglue init`.
pub const STARTER_CONFIG: &str = r#"# cssglue configuration
#
# Every target glues its file groups into <dest>.css and/or <dest>.min.css.
# Less and Sass sources are compiled into temp_dir first.

[options]
temp_dir = ".cssglue-tmp"
output = "both"              # clean, minified or both
banner = "/*! my site */"
banner_on = "both"           # which outputs get the banner

[targets.app.options.concat]
separator = "\n"

[[targets.app.files]]
src = ["styles/*.css", "styles/*.less", "styles/*.scss"]
dest = "dist/app"

[tools]
less = ["lessc", "{src}", "{dest}"]
sass = ["sass", "--no-source-map", "--style=expanded", "{src}", "{dest}"]
"#;

/// Load the config and build a context rooted at the config's directory.
fn load_context(
    config_path: Option<&Path>,
    overrides: &CliOverrides,
    targets: &[String],
) -> Result<BuildContext, ConfigError> {
    let (mut config, path) = load_config(config_path)?;
    let path = if path.is_absolute() { path } else { env::current_dir()?.join(path) };
    tracing::debug!("Using config: {}", path.display());

    merge_cli_overrides(&mut config, overrides);

    let root = path.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));
    let context = BuildContext::new(config, root);
    if targets.is_empty() {
        Ok(context)
    } else {
        Ok(context.with_filter(targets.to_vec()))
    }
}

fn exit_code_for(err: &BuildError) -> ExitCode {
    match err {
        BuildError::UnknownTarget(_) => ExitCode::from(EXIT_INVALID_ARGS),
        _ => ExitCode::from(EXIT_ERROR),
    }
}

/// Run the build command
pub fn run_build(
    targets: &[String],
    config: Option<&Path>,
    output: Option<&str>,
    temp_dir: Option<&Path>,
    dry_run: bool,
    fail_fast: bool,
) -> ExitCode {
    if let Some(mode) = output {
        if let Err(e) = OutputMode::parse("output", mode) {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    }

    let overrides = CliOverrides {
        temp_dir: temp_dir.map(Path::to_path_buf),
        output: output.map(str::to_string),
    };
    let context = match load_context(config, &overrides, targets) {
        Ok(context) => context,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let pipeline = BuildPipeline::new(context).with_fail_fast(fail_fast).with_dry_run(dry_run);

    let result = if dry_run {
        let mut recorder = RecordingExecutor::new();
        let result = pipeline.build_with(&mut recorder);
        if result.is_ok() {
            println!("Dry run - would run:");
            for job in recorder.jobs() {
                println!("  {} [{} -> {}]", job.id(), job.src, job.dest.display());
            }
        }
        result
    } else {
        pipeline.build()
    };

    match result {
        Ok(result) if result.is_success() => {
            println!("{}", result.summary());
            ExitCode::from(EXIT_SUCCESS)
        }
        Ok(result) => {
            eprintln!("{}", result.summary());
            ExitCode::from(EXIT_ERROR)
        }
        Err(e) => {
            eprintln!("Build error: {}", e);
            exit_code_for(&e)
        }
    }
}

/// Run the check command
///
/// Resolves every target's options and prints its job chain. Nothing is
/// executed.
pub fn run_check(targets: &[String], config: Option<&Path>) -> ExitCode {
    let context = match load_context(config, &CliOverrides::default(), targets) {
        Ok(context) => context,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match check_targets(&context) {
        Ok(jobs) => {
            println!("Config OK: {} jobs", jobs);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_code_for(&e)
        }
    }
}

fn check_targets(context: &BuildContext) -> Result<usize, BuildError> {
    let plan = context.create_plan()?;
    let mut total = 0;

    for target in plan.targets() {
        let options = resolve(&context.target_options(&target.name)?)?;
        println!(
            "{} (output: {}, temp: {})",
            target.name,
            options.output(),
            options.temp_dir().display()
        );

        let mut builder = PipelineBuilder::new(
            &target.name,
            &options,
            SequentialNamer::new(),
            RecordingExecutor::new(),
        );
        for group in &target.files {
            for job in builder.plan_group(group)? {
                println!("  {} [{} -> {}]", job.id(), job.src, job.dest.display());
                total += 1;
            }
        }
    }

    Ok(total)
}

/// Run the init command
pub fn run_init(path: Option<&Path>, force: bool) -> ExitCode {
    let dir = match path {
        Some(p) => p.to_path_buf(),
        None => env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        eprintln!("Error: {} already exists", config_path.display());
        eprintln!("Use --force to overwrite it");
        return ExitCode::from(EXIT_ERROR);
    }

    let written = fs::create_dir_all(&dir).and_then(|_| fs::write(&config_path, STARTER_CONFIG));
    match written {
        Ok(()) => {
            println!("Created {}", config_path.display());
            println!();
            println!("Next steps:");
            println!("  edit the [[targets.app.files]] patterns");
            println!("  cssglue check");
            println!("  cssglue build");
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: Cannot write {}: {}", config_path.display(), e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
