use std::io;

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "LOANCHAT_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";

/// Installs a stderr fmt subscriber so stdout carries command output only.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    // A second install (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
