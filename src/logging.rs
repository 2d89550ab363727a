//! Diagnostic tracing.
//!
//! Stdout carries only the per-file status lines and the summary, so a run
//! can be piped or diffed as is. Everything emitted through `tracing` goes
//! to stderr, and per-file events are at `debug` level: a run without
//! `RUST_LOG` leaves stderr empty.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset or unparsable.
const DEFAULT_FILTER: &str = "warn";

/// Install the stderr subscriber, e.g. `RUST_LOG=fix_entities=debug fix-entities`.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
