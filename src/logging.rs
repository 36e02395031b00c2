//! Logging configuration for Quantbot.
//!
//! Logs go to stderr so the chat transcript on stdout stays clean.

use tracing_subscriber::EnvFilter;

/// Initializes logging to stderr.
///
/// The default level is `info`; override with `RUST_LOG`.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
