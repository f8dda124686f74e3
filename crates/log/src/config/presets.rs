//! Configuration presets for common scenarios

use std::path::Path;

use super::{AppenderSpec, ConsoleSpec, LayoutSpec, Level, LogConfig, RollingFileSpec, RootLoggerSpec};

/// Name of the console appender in the presets
pub(crate) const CONSOLE_APPENDER: &str = "console";
/// Name of the rolling file appender in the presets
pub(crate) const FILE_APPENDER: &str = "file";
/// Rollover threshold of the suite preset (128 KiB)
pub(crate) const SUITE_ROLLOVER_BYTES: u64 = 128 * 1024;

impl LogConfig {
    /// Console on stdout only, default layout
    #[must_use]
    pub fn console(level: Level) -> Self {
        Self {
            layout: LayoutSpec::default(),
            appenders: vec![AppenderSpec::console(
                CONSOLE_APPENDER,
                ConsoleSpec::default(),
            )],
            root: RootLoggerSpec::new(level, [CONSOLE_APPENDER]),
        }
    }

    /// Console plus `<dir>/<base>.log` rolled into `<dir>/<base>-%i.zip` at
    /// 128 KiB, root at INFO
    #[must_use]
    pub fn suite(directory: &Path, base_name: &str) -> Self {
        let file = RollingFileSpec::new(
            directory.join(format!("{base_name}.log")),
            directory.join(format!("{base_name}-%i.zip")),
            SUITE_ROLLOVER_BYTES,
        );

        Self {
            layout: LayoutSpec::default(),
            appenders: vec![
                AppenderSpec::console(CONSOLE_APPENDER, ConsoleSpec::default()),
                AppenderSpec::rolling_file(FILE_APPENDER, file),
            ],
            root: RootLoggerSpec::new(Level::Info, [CONSOLE_APPENDER, FILE_APPENDER]),
        }
    }

    /// Test configuration (trace level, console only, no colours)
    #[cfg(test)]
    pub fn test() -> Self {
        let mut config = Self::console(Level::Trace);
        config.appenders = vec![AppenderSpec::console(
            CONSOLE_APPENDER,
            ConsoleSpec {
                highlight: false,
                ..ConsoleSpec::default()
            },
        )];
        config
    }
}
