//! Logging setup with file rotation.

use crate::error::{DesktopError, Result};

use std::path::{Path, PathBuf};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

const LOG_FILE_PREFIX: &str = "rustfs-desktop";
const DEFAULT_FILTER: &str = "info,rfs_supervisor=debug";

/// Setup logging with console and rotating file output.
///
/// # Log Layers
/// - Console: Human-readable, colored output
/// - File: plain text, daily rotation, 7-day retention
///
/// `log` records from `rfs-config` are bridged into the same subscriber.
pub fn setup_logging(data_dir: &Path) -> Result<()> {
    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).map_err(|e| DesktopError::directory(&logs_dir, e))?;

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_ansi(true);

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(7)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(&logs_dir)
        .map_err(|e| DesktopError::logging(e.to_string()))?;

    let file_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_writer(file_appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| DesktopError::logging(e.to_string()))
}

/// Path of today's log file.
pub fn current_log_path(data_dir: &Path) -> PathBuf {
    let today = chrono::Local::now().format("%Y-%m-%d");
    data_dir
        .join("logs")
        .join(format!("{LOG_FILE_PREFIX}.{today}.log"))
}
