//! Shared logging utilities for BPEL Console binaries.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_LOG_FILTER: &str =
    "bpel_console=info,bpel_console_config=info,bpel_console_proxy=info";
const HOME_ENV: &str = "BPEL_CONSOLE_HOME";

/// Logging configuration shared by BPEL Console binaries.
pub struct LogConfig<'a> {
    pub app_name: &'a str,
    /// Mirror the file filter on stderr instead of warnings only.
    pub verbose: bool,
    /// Also write a daily-rolling log under [`logs_dir`].
    pub log_to_file: bool,
}

/// Keeps the background file writer alive. Drop it at process exit to
/// flush buffered lines.
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Initialize tracing with stderr output and an optional rolling file.
pub fn init_logging(config: LogConfig<'_>) -> Result<LogGuard> {
    let console_filter = if config.verbose {
        default_filter()
    } else {
        EnvFilter::new("warn")
    };

    let (file_layer, guard, log_dir) = if config.log_to_file {
        let log_dir = ensure_logs_dir().context("Failed to ensure log directory")?;
        let appender = tracing_appender::rolling::daily(&log_dir, log_file_name(config.app_name));
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_filter(default_filter());
        (Some(layer), Some(guard), Some(log_dir))
    } else {
        (None, None, None)
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(console_filter),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    if let Some(dir) = log_dir {
        tracing::debug!(dir = %dir.display(), "File logging enabled");
    }
    Ok(LogGuard { _file: guard })
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Get the console home directory: `$BPEL_CONSOLE_HOME` or `~/.bpel_console`.
pub fn console_home() -> Result<PathBuf> {
    if let Ok(override_path) = std::env::var(HOME_ENV) {
        if !override_path.is_empty() {
            return Ok(PathBuf::from(override_path));
        }
    }
    dirs::home_dir()
        .map(|home| home.join(".bpel_console"))
        .with_context(|| format!("Could not determine home directory; set {}", HOME_ENV))
}

/// Get the logs directory: `<console home>/logs`.
pub fn logs_dir() -> Result<PathBuf> {
    Ok(console_home()?.join("logs"))
}

/// Ensure the logs directory exists.
pub fn ensure_logs_dir() -> Result<PathBuf> {
    let logs = logs_dir()?;
    fs::create_dir_all(&logs)
        .with_context(|| format!("Failed to create logs directory: {}", logs.display()))?;
    Ok(logs)
}

fn log_file_name(app_name: &str) -> String {
    let base: String = app_name
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' { ch } else { '_' })
        .collect();
    format!("{}.log", base)
}
