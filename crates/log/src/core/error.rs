//! Error handling for lumen-log
//!
//! Only setup can fail through this type. Write-time I/O errors stay inside
//! the sink writers and are reported on stderr by the appender layer.

use std::path::PathBuf;

/// Type alias for Result with [`LogError`] for logging operations
pub type LogResult<T> = Result<T, LogError>;

/// Errors raised while assembling or activating a logging configuration
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LogError {
    /// Configuration is structurally invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Root level could not be turned into a filter
    #[error("Invalid filter '{filter}': {reason}")]
    Filter {
        /// The offending filter string
        filter: String,
        /// Parser message
        reason: String,
    },

    /// Layout pattern could not be parsed
    #[error("Invalid layout pattern '{pattern}': {reason}")]
    Layout {
        /// The offending pattern
        pattern: String,
        /// What was wrong at which offset
        reason: String,
    },

    /// A well-known directory could not be resolved
    #[error("Directory error: {0}")]
    Directory(String),

    /// Another subscriber already owns the global default
    #[error("A global tracing subscriber is already installed")]
    AlreadyInitialized,

    /// Swapping the active filter or sinks failed
    #[error("Failed to reload logging configuration: {0}")]
    Reload(String),

    /// IO error outside any write path (e.g. reading a log back)
    #[error("IO error on '{}': {source}", path.display())]
    Io {
        /// File the operation touched
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl LogError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a layout error
    pub fn layout(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Layout {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Create an IO error bound to a path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
