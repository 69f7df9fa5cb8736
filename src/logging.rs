use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::error::Error;

/// Sends logs to `<dir>/timedquiz.log`; the terminal belongs to the TUI.
/// `RUST_LOG` wins over `default_filter`. Keep the guard alive until exit
/// so buffered lines are flushed.
pub fn init(dir: &Path, default_filter: &str) -> Result<WorkerGuard, Error> {
    std::fs::create_dir_all(dir).map_err(|e| Error::Logging(e.to_string()))?;

    let appender = tracing_appender::rolling::never(dir, "timedquiz.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .map_err(|e| Error::Logging(e.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))?;

    Ok(guard)
}
