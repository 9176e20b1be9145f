use tracing_subscriber::EnvFilter;

use crate::error::{BooklogError, Result};

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
pub fn init() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| BooklogError::Logging(err.to_string()))
}
