//! Logging setup for the Clickrush binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Crate targets whose logs are enabled by default alongside the binary.
const LIBRARY_TARGETS: &[&str] = &["clickrush_server", "clickrush_shared", "tower_http"];

/// Build the default filter directive used when `RUST_LOG` is not set.
///
/// Every library target plus the binary itself gets `default_log_level`.
pub fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    LIBRARY_TARGETS
        .iter()
        .copied()
        .chain(std::iter::once(binary_name))
        .map(|target| format!("{}={}", target.replace('-', "_"), default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Examples
///
/// ```no_run
/// use clickrush_shared::logger::setup_logger;
///
/// setup_logger("clickrush-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
