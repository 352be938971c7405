//! Tracing setup for the binary

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter (e.g. `fintrack=debug`)
pub const LOG_ENV: &str = "FINTRACK_LOG";

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber, logging to stderr so command output stays clean.
///
/// Safe to call more than once; only the first call has an effect.
pub fn init() {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

        // A subscriber may already be installed by an embedding application
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
