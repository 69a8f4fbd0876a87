//! Logging setup utilities for the planning poker server and client.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build the fallback filter directive used when `RUST_LOG` is not set.
///
/// Both the library crate (`mitsumori_server` / `mitsumori_client`) and the binary
/// target get the same default level.
pub fn default_filter_directive(crate_name: &str, binary_name: &str, level: &str) -> String {
    format!(
        "{}={},{}={},tower_http={}",
        crate_name.replace('-', "_"),
        level,
        binary_name.replace('-', "_"),
        level,
        level
    )
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `crate_name` - The package that owns the binary (e.g., "mitsumori-server")
/// * `binary_name` - The name of the binary (e.g., "mitsumori-server")
/// * `default_level` - The default log level (e.g., "debug", "info")
///
/// # Examples
///
/// ```no_run
/// use mitsumori_shared::logger::setup_logger;
///
/// setup_logger(env!("CARGO_PKG_NAME"), "mitsumori-server", "debug");
/// ```
pub fn setup_logger(crate_name: &str, binary_name: &str, default_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                default_filter_directive(crate_name, binary_name, default_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
