/// Application-level constants
pub const APP_NAME: &str = "Modelbench";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// File extension for model and archive exports.
pub const ARCHIVE_EXTENSION: &str = "kyx";

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> String {
    format!("{}=info", env!("CARGO_PKG_NAME"))
}
