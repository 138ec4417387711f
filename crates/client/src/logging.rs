//! File logging for the interactive client.
//!
//! Stdout belongs to the game prompt, so log records only go to a file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_FILE: &str = "client.log";

/// Installs the global subscriber. Keep the returned guard alive until exit
/// so buffered records are flushed.
pub fn setup_logging() -> Result<WorkerGuard> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    // RUST_LOG wins; otherwise record info and above.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    tracing::info!(path = %log_dir.join(LOG_FILE).display(), "logging initialized");
    Ok(guard)
}

/// Platform cache directory for logs.
///
/// - Linux: `~/.cache/adventure/logs`
/// - macOS: `~/Library/Caches/adventure/logs`
/// - Windows: `%LOCALAPPDATA%\adventure\cache\logs`
fn log_directory() -> PathBuf {
    directories::ProjectDirs::from("", "", "adventure")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("adventure").join("logs"))
}
