mod config;
pub use config::LoggerConfig;

mod error;
pub use error::{LoggerError, LoggerResult};

mod format;
pub use format::LoggerFormat;

mod level;
pub use level::LoggerLevel;

mod init;
mod rfc3339;

/// Initializes the global tracing subscriber with the given configuration.
///
/// Once installed, all `tracing` macros (`info!`, `debug!`, ...) go through
/// this subscriber. Calling it twice returns
/// [`LoggerError::AlreadyInitialized`].
pub fn init_logger(cfg: &LoggerConfig) -> LoggerResult<()> {
    match cfg.format {
        LoggerFormat::Text => init::logger_text(cfg),
        LoggerFormat::Json => init::logger_json(cfg),
        LoggerFormat::Journald => init::logger_journald(cfg),
    }
}
