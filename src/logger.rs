use tracing_subscriber::prelude::*;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
};

/// Installs the global subscriber. `RUST_LOG` overrides `default_level`.
///
/// Span close events (with their durations) are only logged at debug verbosity.
pub fn init_with_level(default_level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let verbose = env_filter.to_string().contains("debug") || env_filter.to_string().contains("trace");

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_timer(fmt::time::uptime())
        .with_span_events(if verbose { FmtSpan::CLOSE } else { FmtSpan::NONE });

    // A subscriber may already be installed, e.g. by a test harness.
    let _ = tracing_subscriber::registry().with(env_filter).with(fmt_layer).try_init();
}

pub fn init() {
    init_with_level("info");
}
