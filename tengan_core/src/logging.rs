//! Logging infrastructure for Tengan.
//!
//! Centralized tracing setup shared by the binaries. Corruption recovery
//! and degraded paths log at warn level instead of surfacing errors.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging with sensible defaults
///
/// Default level is WARN so the countdown display stays quiet; override
/// with the RUST_LOG environment variable.
pub fn init() {
    init_with_level("warn")
}

/// Initialize logging with a specific default level, still overridable
/// by RUST_LOG.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}
