//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod build;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

pub use build::STARTER_CONFIG;

/// Process exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// cssglue - glue Less, Sass and CSS sources into readable and minified stylesheets
#[derive(Parser)]
#[command(name = "cssglue")]
#[command(
    about = "cssglue - glue Less, Sass and CSS sources into readable and minified stylesheets"
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build targets from cssglue.toml
    Build {
        /// Targets to build (default: every target, `*` matches all)
        targets: Vec<String>,

        /// Path to cssglue.toml (default: search upwards from the current directory)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the output mode of every target: clean, minified, both
        #[arg(short, long)]
        output: Option<String>,

        /// Override the temp directory of every target
        #[arg(long)]
        temp_dir: Option<PathBuf>,

        /// Dry run (print the jobs that would run without running them)
        #[arg(long)]
        dry_run: bool,

        /// Stop after the first failed target
        #[arg(long)]
        fail_fast: bool,
    },

    /// Validate cssglue.toml and print the job chain of each target
    Check {
        /// Targets to check (default: every target)
        targets: Vec<String>,

        /// Path to cssglue.toml (default: search upwards from the current directory)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write a starter cssglue.toml
    Init {
        /// Directory to create the config in (default: current directory)
        path: Option<PathBuf>,

        /// Overwrite an existing cssglue.toml
        #[arg(short, long)]
        force: bool,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    crate::logger::init_logger(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Build { targets, config, output, temp_dir, dry_run, fail_fast } => {
            build::run_build(
                &targets,
                config.as_deref(),
                output.as_deref(),
                temp_dir.as_deref(),
                dry_run,
                fail_fast,
            )
        }
        Commands::Check { targets, config } => build::run_check(&targets, config.as_deref()),
        Commands::Init { path, force } => build::run_init(path.as_deref(), force),
    }
}
