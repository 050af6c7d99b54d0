//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the Aeris tracing/logging system.
///
/// Reads the `AERIS_LOG` environment variable for per-subsystem log levels,
/// e.g. `AERIS_LOG=aeris_analysis=debug,aeris_storage=warn`. Falls back to
/// `aeris=info` when unset or invalid.
///
/// Idempotent; calling it multiple times is safe.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env("AERIS_LOG").unwrap_or_else(|_| EnvFilter::new("aeris=info"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(filter)
            .init();
    });
}
