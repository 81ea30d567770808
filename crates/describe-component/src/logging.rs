//! Test logging setup.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "DESCRIBE_COMPONENT_LOG";

const DEFAULT_DIRECTIVES: &str = "warn";

/// Install a fmt subscriber that writes through the test harness.
///
/// The filter comes from [`LOG_ENV`] (for example
/// `DESCRIBE_COMPONENT_LOG=describe_component=debug`) and falls back to
/// `warn`. Safe to call from every test; returns `true` only for the call
/// that installed the subscriber.
pub fn init_test_logging() -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(DEFAULT_DIRECTIVES))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_noop() {
        let _ = init_test_logging();
        assert!(!init_test_logging());
        tracing::debug!("logging initialised");
    }
}
