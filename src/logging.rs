//! Tracing subscriber setup.
//!
//! The library itself only emits `tracing` events. Embedders (and tests)
//! call [`init`] once to get them on stderr.

use tracing_subscriber::EnvFilter;

/// Install a formatting subscriber filtered by `RUST_LOG`, falling back to
/// `default_filter` (e.g. `"spark_ui_manager=debug"`).
///
/// Returns false if a global subscriber was already installed.
pub fn init(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
