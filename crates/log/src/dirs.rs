//! Per-platform application directories

use std::path::PathBuf;

use crate::core::{LogError, LogResult};

/// Private data directory of a suite: `<config dir>/<suite>`
///
/// `%APPDATA%` on Windows, `~/Library/Application Support` on macOS and
/// `$XDG_CONFIG_HOME` (or `~/.config`) on Linux. Nothing is created.
pub fn app_data_directory(suite: &str) -> LogResult<PathBuf> {
    ::dirs::config_dir()
        .map(|base| base.join(suite))
        .ok_or_else(|| {
            LogError::Directory(format!(
                "no configuration directory on this platform for '{suite}'"
            ))
        })
}

/// Logs directory of a suite: `<config dir>/<suite>/logs`
pub fn app_logs_directory(suite: &str) -> LogResult<PathBuf> {
    app_data_directory(suite).map(|dir| dir.join("logs"))
}
