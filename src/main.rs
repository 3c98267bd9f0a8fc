//! cssglue - glue Less, Sass and CSS sources into one stylesheet

use std::process::ExitCode;

use cssglue::cli;

fn main() -> ExitCode {
    cli::run()
}
