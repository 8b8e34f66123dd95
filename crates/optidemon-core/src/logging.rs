//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

const LOG_FILE_NAME: &str = "optidemon.log";

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/optidemon/logs/` because the TUI owns
/// stdout. Log level is controlled by the `OPTIDEMON_LOG` environment variable.
///
/// # Examples
/// ```bash
/// OPTIDEMON_LOG=debug cargo run
/// OPTIDEMON_LOG=optidemon_app=trace cargo run
/// ```
pub fn init() -> Result<()> {
    let log_dir = get_log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_NAME);

    // Default to info for our crates, allow override via OPTIDEMON_LOG
    let env_filter = EnvFilter::try_from_env("OPTIDEMON_LOG").unwrap_or_else(|_| {
        EnvFilter::new("optidemon=info,optidemon_app=info,optidemon_client=info,warn")
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("═══════════════════════════════════════════════════════");
    tracing::info!("optidemon starting");
    tracing::info!("Log directory: {}", log_dir.display());
    tracing::info!("═══════════════════════════════════════════════════════");

    Ok(())
}

/// Get the log directory path
fn get_log_directory() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("optidemon").join("logs")
}

/// Get the log file path for the current day
pub fn get_current_log_file() -> PathBuf {
    get_log_directory().join(LOG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_lives_under_optidemon_logs() {
        let path = get_current_log_file();
        assert!(path.ends_with("optidemon/logs/optidemon.log"));
    }
}
