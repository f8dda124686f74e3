//! Core configuration types

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::LevelFilter;

use super::{AppenderSpec, LayoutSpec, RootLoggerSpec};
use crate::core::{LogError, LogResult};

/// Logging configuration
///
/// Constructed fresh for every activation and consumed by it. Invariants
/// (unique appender names, root references only registered appenders, the
/// layout pattern parses) are checked by [`LogConfig::new`] and again before
/// activation, so documents loaded through serde are covered as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Layout shared by every appender
    #[serde(default)]
    pub layout: LayoutSpec,

    /// Registered appenders
    pub appenders: Vec<AppenderSpec>,

    /// Root logger
    pub root: RootLoggerSpec,
}

/// Log level
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Trace level
    Trace,
    /// Debug level
    Debug,
    /// Info level
    #[default]
    Info,
    /// Warn level
    Warn,
    /// Error level
    Error,
    /// Nothing is logged
    Off,
}

impl Level {
    /// Lowercase name, valid as a filter directive
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Off => "off",
        }
    }

    /// Equivalent tracing-subscriber filter
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            Level::Trace => LevelFilter::TRACE,
            Level::Debug => LevelFilter::DEBUG,
            Level::Info => LevelFilter::INFO,
            Level::Warn => LevelFilter::WARN,
            Level::Error => LevelFilter::ERROR,
            Level::Off => LevelFilter::OFF,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl LogConfig {
    /// Assemble and validate a configuration
    pub fn new(
        layout: LayoutSpec,
        appenders: Vec<AppenderSpec>,
        root: RootLoggerSpec,
    ) -> LogResult<Self> {
        let config = Self {
            layout,
            appenders,
            root,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document and validate it
    pub fn from_json(document: &str) -> LogResult<Self> {
        let config: Self = serde_json::from_str(document)
            .map_err(|e| LogError::config(format!("invalid JSON document: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every structural invariant
    pub fn validate(&self) -> LogResult<()> {
        self.layout.compile()?;

        let mut names = HashSet::with_capacity(self.appenders.len());
        for appender in &self.appenders {
            appender.validate()?;
            if !names.insert(appender.name.as_str()) {
                return Err(LogError::config(format!(
                    "duplicate appender name '{}'",
                    appender.name
                )));
            }
        }

        let mut referenced = HashSet::with_capacity(self.root.appender_refs.len());
        for name in &self.root.appender_refs {
            if !names.contains(name.as_str()) {
                return Err(LogError::config(format!(
                    "root logger references unknown appender '{name}'"
                )));
            }
            if !referenced.insert(name.as_str()) {
                return Err(LogError::config(format!(
                    "root logger references appender '{name}' twice"
                )));
            }
        }

        Ok(())
    }

    /// Appenders referenced by the root logger, in reference order
    pub fn attached_appenders(&self) -> impl Iterator<Item = &AppenderSpec> {
        self.root.appender_refs.iter().filter_map(|name| {
            self.appenders
                .iter()
                .find(|appender| &appender.name == name)
        })
    }

    /// Look up a registered appender by name
    pub fn appender(&self, name: &str) -> Option<&AppenderSpec> {
        self.appenders.iter().find(|appender| appender.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConsoleSpec, RollingFileSpec};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn console(name: &str) -> AppenderSpec {
        AppenderSpec::console(name, ConsoleSpec::default())
    }

    #[test]
    fn test_valid_config() {
        let config = LogConfig::new(
            LayoutSpec::default(),
            vec![
                console("console"),
                AppenderSpec::rolling_file(
                    "file",
                    RollingFileSpec::new("/tmp/a.log", "/tmp/a-%i.zip", 1024),
                ),
            ],
            RootLoggerSpec::new(Level::Info, ["file", "console"]),
        )
        .unwrap();

        let order: Vec<_> = config.attached_appenders().map(|a| a.name.as_str()).collect();
        assert_eq!(order, vec!["file", "console"]);
        assert!(config.appender("console").is_some());
        assert!(config.appender("missing").is_none());
    }

    #[test]
    fn test_duplicate_appender_names_rejected() {
        let err = LogConfig::new(
            LayoutSpec::default(),
            vec![console("console"), console("console")],
            RootLoggerSpec::new(Level::Info, ["console"]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate appender name 'console'"));
    }

    #[test]
    fn test_unknown_reference_rejected() {
        let err = LogConfig::new(
            LayoutSpec::default(),
            vec![console("console")],
            RootLoggerSpec::new(Level::Info, ["console", "file"]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown appender 'file'"));
    }

    #[test]
    fn test_repeated_reference_rejected() {
        let err = LogConfig::new(
            LayoutSpec::default(),
            vec![console("console")],
            RootLoggerSpec::new(Level::Info, ["console", "console"]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("twice"));
    }

    #[test]
    fn test_bad_layout_rejected() {
        let err = LogConfig::new(
            LayoutSpec::new("%bogus"),
            vec![console("console")],
            RootLoggerSpec::new(Level::Info, ["console"]),
        )
        .unwrap_err();
        assert!(matches!(err, LogError::Layout { .. }));
    }

    #[rstest]
    #[case(Level::Trace, LevelFilter::TRACE)]
    #[case(Level::Debug, LevelFilter::DEBUG)]
    #[case(Level::Info, LevelFilter::INFO)]
    #[case(Level::Warn, LevelFilter::WARN)]
    #[case(Level::Error, LevelFilter::ERROR)]
    #[case(Level::Off, LevelFilter::OFF)]
    fn test_level_filter(#[case] level: Level, #[case] expected: LevelFilter) {
        assert_eq!(level.to_level_filter(), expected);
        assert_eq!(level.as_str(), level.to_string());
    }

    #[test]
    fn test_from_json() {
        let config = LogConfig::from_json(
            r#"{
                "appenders": [
                    { "name": "console", "type": "console", "target": "stderr" },
                    {
                        "name": "file",
                        "type": "rolling-file",
                        "file": "/var/log/acme.log",
                        "archive_pattern": "/var/log/acme-%i.zip",
                        "max_size_bytes": 131072
                    }
                ],
                "root": { "level": "warn", "appender_refs": ["console", "file"] }
            }"#,
        )
        .unwrap();

        assert_eq!(config.layout, LayoutSpec::default());
        assert_eq!(config.root.level, Level::Warn);
        match &config.appender("file").unwrap().kind {
            crate::config::AppenderKind::RollingFile(spec) => {
                assert_eq!(spec.max_size_bytes, 131_072);
                assert_eq!(spec.max_archives, crate::config::DEFAULT_MAX_ARCHIVES);
                assert!(spec.append);
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn test_from_json_validates() {
        let err = LogConfig::from_json(
            r#"{ "appenders": [], "root": { "level": "info", "appender_refs": ["file"] } }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown appender"));
    }
}
