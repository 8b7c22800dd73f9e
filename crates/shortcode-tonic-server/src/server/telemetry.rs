//! Structured logging for the generation service.
//!
//! Log output goes through `tracing` with an `EnvFilter`: set `RUST_LOG` to
//! adjust verbosity (e.g. `RUST_LOG=shortcode=debug` to watch pool refills
//! and served codes). Defaults to `info`.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_telemetry() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
