pub use tracing::{debug, error, info, warn, trace, instrument};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt::{self, format::FmtSpan}};

/// Default filter when `RUST_LOG` is unset. Stage spans are logged at `info`,
/// per-slice detail at `debug`.
const DEFAULT_FILTER: &str = "info";

pub fn init() {
    if let Err(e) = try_init() {
        eprintln!("logger already initialized: {}", e);
    }
}

/// Installs the global subscriber, failing if one is already set.
///
/// Span close events (with busy/idle time) are only emitted when the filter
/// enables `debug`, so stage timings show up in debug runs without a separate
/// timing layer.
pub fn try_init() -> Result<(), tracing_subscriber::util::TryInitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let is_debug = env_filter.to_string().contains("debug") ||
                   std::env::var("RUST_LOG").unwrap_or_default().contains("debug");

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_timer(fmt::time::uptime())
        .with_span_events(if is_debug {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
}
