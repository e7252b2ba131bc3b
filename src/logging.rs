//! Tracing subscriber setup.
//!
//! Logs go to stderr: stdout carries CLI reports and MCP JSON-RPC traffic.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `i18nboard=debug`.
pub const LOG_ENV: &str = "I18NBOARD_LOG";

fn filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber. Calling it twice is a no-op.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
