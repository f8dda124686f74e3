//! Core components for the lumen logging system.
//!
//! ### [`error`] - Error handling
//! Structured error type for configuration, filter, layout and IO failures.

pub mod error;

// Re-export core types
pub use error::{LogError, LogResult};
