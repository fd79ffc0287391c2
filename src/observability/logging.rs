//! `tracing-subscriber` initialization.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "SPACEWORLD_LOG";

/// Install a stderr subscriber.
///
/// The filter comes from [`LOG_ENV`] when set, otherwise from
/// `default_level` (any `EnvFilter` directive, e.g. `"debug"` or
/// `"spaceworld=trace"`). Returns `false` if a global subscriber was
/// already installed.
pub fn init_logging(default_level: &str) -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}

/// Install a stderr subscriber at `info` unless [`LOG_ENV`] says otherwise.
pub fn init_logging_from_env() -> bool {
    init_logging("info")
}
