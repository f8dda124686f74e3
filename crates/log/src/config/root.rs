//! Root logger configuration

use serde::{Deserialize, Serialize};

use super::Level;

/// Minimum severity plus the ordered appenders every event is routed to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootLoggerSpec {
    /// Events below this level are dropped before any appender sees them
    #[serde(default)]
    pub level: Level,
    /// Names of registered appenders, in dispatch order
    #[serde(default)]
    pub appender_refs: Vec<String>,
}

impl RootLoggerSpec {
    /// Create a root logger at `level` attached to `appender_refs`
    pub fn new<I, S>(level: Level, appender_refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            level,
            appender_refs: appender_refs.into_iter().map(Into::into).collect(),
        }
    }
}
