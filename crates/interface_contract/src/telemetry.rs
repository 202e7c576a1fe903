//! Tracing bootstrap
//!
//! Embedders and the integration test suite call [`init`] once to wire
//! a subscriber; repeat calls are a no-op so tests can call it freely.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber
///
/// Respects `RUST_LOG` when set, falling back to `default_level`.
pub fn init(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
