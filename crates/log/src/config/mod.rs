//! Configuration types
//!
//! This module provides the plain data model of a logging configuration:
//! - `base`: the validated [`LogConfig`] document and [`Level`]
//! - `appender`: named sinks ([`AppenderSpec`])
//! - `layout`: the shared format pattern ([`LayoutSpec`])
//! - `root`: the root logger ([`RootLoggerSpec`])
//! - `presets`: ready-made documents

mod appender;
mod base;
mod layout;
mod presets;
mod root;

// Re-export all public types
pub use appender::{
    AppenderKind, AppenderSpec, ConsoleSpec, ConsoleTarget, DEFAULT_MAX_ARCHIVES,
    RollingFileSpec,
};
pub use base::{Level, LogConfig};
pub use layout::{DEFAULT_PATTERN, LayoutSpec};
pub use root::RootLoggerSpec;
