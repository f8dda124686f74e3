//! # Lumen Log - suite logging setup
//!
//! Console plus size-rolling file logging behind one shared pattern layout.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lumen_log::prelude::*;
//!
//! fn main() -> Result<()> {
//!     // <dir>/acme.log, rolled into <dir>/acme-<N>.zip at 128 KiB
//!     LogConfigurator::new("/tmp/acme/logs", "Acme").configure()?;
//!
//!     info!(port = 8080, "Server starting");
//!     Ok(())
//! }
//! ```
//!
//! Every event goes through the same layout for all appenders:
//! `[INFO] 2024-03-09 07:05:01.123 acme::net::server::listener: Server starting port=8080`.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod builder;
mod config;
mod configurator;
mod core;
mod dirs;
mod format;
mod layer;
mod layout;
mod macros;
mod writer;

// External dependencies
use parking_lot::Mutex;

// Public API
pub use builder::{Logging, ReloadHandle, RuntimeOverrides};
pub use config::{
    AppenderKind, AppenderSpec, ConsoleSpec, ConsoleTarget, DEFAULT_MAX_ARCHIVES, DEFAULT_PATTERN,
    LayoutSpec, Level, LogConfig, RollingFileSpec, RootLoggerSpec,
};
pub use configurator::{LogConfigurator, LogDirectory, SuiteInfo, SuiteNaming};
pub use crate::core::{LogError, LogResult};
pub use crate::dirs::{app_data_directory, app_logs_directory};
pub use format::UtcTimestamp;
pub use layer::appender::AppenderLayer;
pub use layout::{Layout, Pattern, SharedTimer};
pub use writer::{ConsoleFactory, RollingFileGuard, RollingFileWriter};

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Level, LogConfig, LogConfigurator, LogError, Logging, Result, debug, error, info,
        initialize_logging, log_error, trace, warn,
    };

    pub use tracing::{Span, field};
}

// Re-export tracing macros
pub use tracing::{debug, error, info, instrument, span, trace, warn};

/// Result type for application code using the prelude
pub type Result<T> = std::result::Result<T, LogError>;

/// Logging state installed as the global default, if any
static GLOBAL: Mutex<Option<Logging>> = Mutex::new(None);

// ============================================================================
// Initialization Functions
// ============================================================================

/// Make `config` the process-wide logging configuration
///
/// The first call installs a global dispatcher; every later call swaps its
/// filter and appenders in place, so repeated configuration never
/// duplicates output.
///
/// # Errors
///
/// Returns error if the configuration is invalid, or
/// [`LogError::AlreadyInitialized`] when a subscriber not created here
/// already owns the global default.
pub fn initialize_logging(config: LogConfig) -> LogResult<()> {
    let mut slot = GLOBAL.lock();
    if let Some(active) = slot.as_ref() {
        return active.replace(config);
    }

    let logging = Logging::new(config)?;
    tracing::dispatcher::set_global_default(logging.dispatch().clone())
        .map_err(|_| LogError::AlreadyInitialized)?;

    // `log` records are bridged best-effort; another logger may own the facade.
    #[cfg(feature = "log-compat")]
    let _ = tracing_log::LogTracer::init();

    *slot = Some(logging);
    Ok(())
}

/// Handle of the globally installed configuration, if one is installed
pub fn global_handle() -> Option<ReloadHandle> {
    GLOBAL.lock().as_ref().map(|logging| logging.handle().clone())
}
