//! Suite log configuration
//!
//! [`LogConfigurator`] derives the suite's console plus rolling-file setup
//! from a log directory and the suite name, and installs it process-wide.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::LogConfig;
use crate::core::{LogError, LogResult};

/// Directory where log files are written
///
/// Not checked or created here; the file appender creates it on first write.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogDirectory(PathBuf);

impl LogDirectory {
    /// Wrap a path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// The wrapped path
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl From<PathBuf> for LogDirectory {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

impl From<&Path> for LogDirectory {
    fn from(path: &Path) -> Self {
        Self(path.to_path_buf())
    }
}

impl AsRef<Path> for LogDirectory {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

/// Supplies the product/suite name log files are named after
pub trait SuiteNaming {
    /// Display name of the suite, e.g. `Orature`
    fn suite_name(&self) -> &str;

    /// Base name of log files: the suite name lowercased
    fn log_base_name(&self) -> String {
        self.suite_name().to_lowercase()
    }
}

/// Static suite information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteInfo {
    /// Display name
    pub name: String,
}

impl SuiteInfo {
    /// Create suite information
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl SuiteNaming for SuiteInfo {
    fn suite_name(&self) -> &str {
        &self.name
    }
}

impl SuiteNaming for str {
    fn suite_name(&self) -> &str {
        self
    }
}

impl SuiteNaming for String {
    fn suite_name(&self) -> &str {
        self
    }
}

impl<T: SuiteNaming + ?Sized> SuiteNaming for &T {
    fn suite_name(&self) -> &str {
        (**self).suite_name()
    }
}

/// Builds and activates the suite logging configuration
#[derive(Debug, Clone)]
pub struct LogConfigurator {
    directory: LogDirectory,
    base_name: String,
}

impl LogConfigurator {
    /// Store the target directory and the suite's log base name
    pub fn new(directory: impl Into<PathBuf>, naming: impl SuiteNaming) -> Self {
        Self {
            directory: LogDirectory::new(directory),
            base_name: naming.log_base_name(),
        }
    }

    /// Configurator writing into the platform logs directory of the suite
    pub fn for_suite(naming: impl SuiteNaming) -> LogResult<Self> {
        let directory = crate::dirs::app_logs_directory(naming.suite_name())?;
        Ok(Self::new(directory, naming))
    }

    /// Target directory
    pub fn directory(&self) -> &LogDirectory {
        &self.directory
    }

    /// Path of the active log file
    pub fn active_log_path(&self) -> PathBuf {
        self.directory
            .as_path()
            .join(format!("{}.log", self.base_name))
    }

    /// Assemble the configuration without activating it
    ///
    /// Layout `[%level] %d %logger{4}: %msg%n%ex`, a stdout appender, a
    /// rolling file appender at 128 KiB and an INFO root attached to both.
    pub fn configuration(&self) -> LogResult<LogConfig> {
        let config = LogConfig::suite(self.directory.as_path(), &self.base_name);
        LogConfig::new(config.layout, config.appenders, config.root)
    }

    /// Assemble the configuration and make it the process-wide logger,
    /// replacing any configuration a previous call installed
    pub fn configure(&self) -> LogResult<()> {
        let config = self.configuration()?;
        tracing::debug!(
            directory = %self.directory.as_path().display(),
            base_name = %self.base_name,
            "activating suite logging"
        );
        crate::initialize_logging(config)
    }

    /// Full contents of the active log, `None` when it cannot be read
    pub fn read_active_log(&self) -> Option<String> {
        self.try_read_active_log().ok()
    }

    /// Full contents of the active log
    pub fn try_read_active_log(&self) -> LogResult<String> {
        let path = self.active_log_path();
        let bytes = fs::read(&path).map_err(|e| LogError::io(&path, e))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
