//! Log output setup for the server binary.

use tracing_subscriber::EnvFilter;

use crate::error::Error;

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `level` when set. With `json` every event,
/// access log entries included, is written as one JSON object per line.
pub fn init(level: &str, json: bool) -> Result<(), Error> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| Error::Logging(e.to_string()))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| Error::Logging(e.to_string()))
}
