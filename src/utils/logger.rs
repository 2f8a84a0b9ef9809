//! Logging initialization.
//!
//! Tracing output goes to stderr alongside the verbosity-gated user
//! messages, but defaults to `warn` so it stays quiet unless asked for.
//!
//! # Configuration
//!
//! The log level can be controlled via the `RUST_LOG` environment variable:
//! - `RUST_LOG=debug` - Show debug and higher level logs
//! - `RUST_LOG=info` - Show info and higher level logs
//! - `RUST_LOG=warn` - Show warnings and errors only (default)
//! - `RUST_LOG=error` - Show errors only

use tracing_subscriber::EnvFilter;

/// Initialize the logging system.
///
/// Safe to call once at startup, before anything else logs.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
