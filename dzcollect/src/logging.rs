//! Logging setup.
//!
//! Structured tracing output on stderr, filtered by `RUST_LOG` when set and
//! falling back to the level the caller asks for.

use std::io;
use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber.
///
/// Returns an error string if a subscriber is already installed, which the
/// CLI treats as fatal and tests simply ignore.
pub fn init_logging(default_level: &str) -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| e.to_string())
}
