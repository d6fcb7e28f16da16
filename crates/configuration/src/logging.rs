use crate::error::ConfigError;
use crate::settings::LoggingSettings;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs the global `tracing` subscriber.
///
/// Human-readable output goes to stderr so that JSON written to stdout stays
/// parseable. When `file_dir` is configured a second, ANSI-free layer writes
/// to a daily rolling file; the returned guard must be held until exit or
/// buffered lines are lost.
pub fn init_tracing(settings: &LoggingSettings) -> Result<Option<WorkerGuard>, ConfigError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .map_err(|e| ConfigError::Logging(format!("invalid log filter '{}': {}", settings.level, e)))?;

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    match &settings.file_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "meridian.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .try_init()
                .map_err(|e| ConfigError::Logging(e.to_string()))?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .try_init()
                .map_err(|e| ConfigError::Logging(e.to_string()))?;
            Ok(None)
        }
    }
}
