//! Shared layout configuration

use serde::{Deserialize, Serialize};

use crate::core::LogResult;
use crate::layout::Pattern;

/// `[<level>] <timestamp> <logger, last 4 segments>: <message>\n<error chain>`
pub const DEFAULT_PATTERN: &str = "[%level] %d %logger{4}: %msg%n%ex";

/// A single format pattern string shared by all appenders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSpec {
    /// Conversion pattern, e.g. `[%level] %d %logger{4}: %msg%n`
    pub pattern: String,
}

impl LayoutSpec {
    /// Create a layout from a pattern string
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    /// Parse the pattern into its compiled form
    pub fn compile(&self) -> LogResult<Pattern> {
        Pattern::parse(&self.pattern)
    }
}

impl Default for LayoutSpec {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN)
    }
}
