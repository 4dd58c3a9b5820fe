pub mod archive;
pub mod browse;
pub mod config;
pub mod export;
pub mod models;
pub mod save;
pub mod session;
pub mod store;
pub mod transport;
pub mod upload;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for hosts that do not install their own subscriber.
/// Honors RUST_LOG, falling back to the crate-level default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}
