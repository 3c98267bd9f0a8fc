//! Logging setup for the `cssglue` binary.
//!
//! The library only emits `tracing` events; the binary installs a subscriber
//! once at startup.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// The filter is chosen in this order:
/// 1. `verbose`: debug level for cssglue
/// 2. `quiet`: errors only
/// 3. `RUST_LOG`, when set
/// 4. info level for cssglue
///
/// Log lines go to stderr so that command output on stdout stays clean.
pub fn init_logger(verbose: bool, quiet: bool) {
    let filter = if verbose {
        EnvFilter::new("cssglue=debug")
    } else if quiet {
        EnvFilter::new("cssglue=error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cssglue=info"))
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .compact();

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry().with(filter).with(fmt_layer).try_init();
}
