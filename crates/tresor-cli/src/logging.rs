//! Structured logging setup.
//!
//! Logs go to stderr so they never mix with command output. TRESOR_LOG
//! takes a full `tracing` filter and overrides `-v`.

use tracing_subscriber::EnvFilter;

use crate::constants::LOG_ENV;

fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbosity)));

    // Ignore a second initialisation (tests may call this more than once)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
