//! Tracing subscriber setup.

use crate::config::{AppConfig, LogFormat};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE_PREFIX: &str = "climate-portal.log";

/// Installs the global subscriber. Logs go to stderr, or to a daily rolling file
/// when a log directory is configured. Keep the returned guard alive until exit,
/// otherwise buffered file output is lost.
pub fn init(config: &AppConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let (writer, guard, ansi) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard), false)
        },
        None => (BoxMakeWriter::new(std::io::stderr), None, config.colorize),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi);
    let installed = match config.log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    if let Err(e) = installed {
        eprintln!("Logging was already initialised: {}", e);
    }

    guard
}
