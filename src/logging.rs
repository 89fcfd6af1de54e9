//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives
pub const LOG_ENV: &str = "TAXTREE_LOG";

/// Install a formatting subscriber for the process.
///
/// Directives from `TAXTREE_LOG` take precedence over `default_level`.
/// Calling this more than once is harmless; later calls leave the first
/// subscriber in place and return `false`.
pub fn init_logging(default_level: &str) -> bool {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}
