//! Diagnostic logging setup.
//!
//! Logs go to stderr so that command output on stdout stays parseable.

use tracing_subscriber::EnvFilter;

/// Filter directive for `-v` flags, if any were given.
#[must_use]
pub const fn verbosity_level(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Build the log filter: `RUST_LOG` first, then `-v` flags, then the
/// configured level.
#[must_use]
pub fn build_filter(verbose: u8, configured: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = verbosity_level(verbose).unwrap_or(configured);
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    })
}

/// Install the global subscriber. Calling it twice is a no-op.
pub fn init(verbose: u8, configured: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbose, configured))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
