use tracing_subscriber::EnvFilter;

use crate::config::StoreConfig;

/// Installs a formatting subscriber filtered by `RUST_LOG`, falling back to
/// the configured level. Does nothing if a subscriber is already set.
pub fn init(config: &StoreConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
    {
        tracing::info!(level = %config.log_level, "Logging initialized");
    }
}

/// Logging for tests, captured by the test harness.
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
