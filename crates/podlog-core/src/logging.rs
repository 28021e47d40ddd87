//! File logging for podlog
//!
//! stdout belongs to the rendered log text, so diagnostics go to a daily
//! rolling file under the user's data directory instead.

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Environment variable that overrides [`DEFAULT_DIRECTIVES`]
pub const LOG_ENV_VAR: &str = "PODLOG_LOG";

/// Our crates at info, everything else (tokio, regex, ...) at warn
pub const DEFAULT_DIRECTIVES: &str =
    "warn,podlog=info,podlog_core=info,podlog_process=info,podlog_app=info";

/// Files are named `podlog.log.<date>`
const LOG_FILE_PREFIX: &str = "podlog.log";

/// Install the global subscriber.
///
/// ```bash
/// PODLOG_LOG=debug podlog -- kubectl logs -f web-1
/// PODLOG_LOG=warn,podlog_app::render=trace podlog -- ./server
/// ```
pub fn init() -> Result<()> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_PREFIX);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new("%H:%M:%S%.3f".to_string())),
        )
        .init();

    tracing::info!(
        "podlog {} logging to {}",
        env!("CARGO_PKG_VERSION"),
        log_dir.display()
    );
    Ok(())
}

/// Filter from `PODLOG_LOG`, or [`DEFAULT_DIRECTIVES`] when unset or invalid
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Directory holding the rolling log files
pub fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("podlog")
        .join("logs")
}
