use shared::config::client::DEFAULT_LOG_LEVEL;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber. `RUST_LOG` wins over `level`.
///
/// # Panics
/// Panics if a global subscriber is already installed.
pub fn init(level: &str) {
    // Logs go to stderr so stdout stays the user-facing output.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| level_filter(level)))
        .init();
}

/// Filter for the configured level; an unparsable level falls back to the default.
fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}
