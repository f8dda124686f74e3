//! Appender (sink) configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::{LogError, LogResult};

/// Archives kept before the oldest one is discarded
pub const DEFAULT_MAX_ARCHIVES: u32 = 7;

/// Index placeholder inside [`RollingFileSpec::archive_pattern`]
const INDEX_TOKEN: &str = "%i";

/// A named sink. Every appender renders through the configuration's shared layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppenderSpec {
    /// Unique name referenced from [`RootLoggerSpec`](super::RootLoggerSpec)
    pub name: String,
    /// What kind of sink this is and its attributes
    #[serde(flatten)]
    pub kind: AppenderKind,
}

/// Sink kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
#[non_exhaustive]
pub enum AppenderKind {
    /// Write to a standard stream
    Console(ConsoleSpec),
    /// Write to a file rolled over by size
    RollingFile(RollingFileSpec),
}

/// Standard stream selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleTarget {
    /// Write to stdout
    #[default]
    Stdout,
    /// Write to stderr
    Stderr,
}

/// Console appender attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleSpec {
    /// Stream to write to
    pub target: ConsoleTarget,
    /// Colour the level tag when the stream is a terminal
    pub highlight: bool,
}

impl Default for ConsoleSpec {
    fn default() -> Self {
        Self {
            target: ConsoleTarget::Stdout,
            highlight: true,
        }
    }
}

/// Size-triggered rolling file attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollingFileSpec {
    /// Active log file
    pub file: PathBuf,
    /// Rolled archive path; the file name must contain `%i`
    pub archive_pattern: PathBuf,
    /// Roll over before the active file would grow past this many bytes
    pub max_size_bytes: u64,
    /// Archives kept; the oldest is deleted once this many exist
    #[serde(default = "default_max_archives")]
    pub max_archives: u32,
    /// Keep existing content when opening the active file
    #[serde(default = "default_true")]
    pub append: bool,
    /// Wrap the file in an in-memory buffer
    #[serde(default = "default_true")]
    pub buffered: bool,
    /// Flush after every record
    #[serde(default = "default_true")]
    pub immediate_flush: bool,
}

impl AppenderSpec {
    /// Console appender
    pub fn console(name: impl Into<String>, spec: ConsoleSpec) -> Self {
        Self {
            name: name.into(),
            kind: AppenderKind::Console(spec),
        }
    }

    /// Rolling file appender
    pub fn rolling_file(name: impl Into<String>, spec: RollingFileSpec) -> Self {
        Self {
            name: name.into(),
            kind: AppenderKind::RollingFile(spec),
        }
    }

    pub(crate) fn validate(&self) -> LogResult<()> {
        if self.name.trim().is_empty() {
            return Err(LogError::config("appender name must not be empty"));
        }
        match &self.kind {
            AppenderKind::Console(_) => Ok(()),
            AppenderKind::RollingFile(spec) => spec
                .validate()
                .map_err(|reason| LogError::config(format!("appender '{}': {reason}", self.name))),
        }
    }
}

impl RollingFileSpec {
    /// Rolling file with append mode, buffered writes flushed per record and
    /// [`DEFAULT_MAX_ARCHIVES`] archives
    pub fn new(
        file: impl Into<PathBuf>,
        archive_pattern: impl Into<PathBuf>,
        max_size_bytes: u64,
    ) -> Self {
        Self {
            file: file.into(),
            archive_pattern: archive_pattern.into(),
            max_size_bytes,
            max_archives: DEFAULT_MAX_ARCHIVES,
            append: true,
            buffered: true,
            immediate_flush: true,
        }
    }

    /// Set how many archives are kept
    pub fn with_max_archives(mut self, max_archives: u32) -> Self {
        self.max_archives = max_archives;
        self
    }

    /// Path of the archive with the given index
    pub fn archive_path(&self, index: u32) -> PathBuf {
        let template = self
            .archive_pattern
            .file_name()
            .map(|name| name.to_string_lossy().replace(INDEX_TOKEN, &index.to_string()))
            .unwrap_or_default();
        match self.archive_pattern.parent() {
            Some(dir) => dir.join(template),
            None => PathBuf::from(template),
        }
    }

    /// Name of the single entry stored inside the archive with the given index
    pub(crate) fn archive_entry_name(&self, index: u32) -> String {
        let archive = self.archive_path(index);
        let stem = archive
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| index.to_string());
        let ext = self
            .file
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("log");
        format!("{stem}.{ext}")
    }

    fn validate(&self) -> Result<(), String> {
        if self.file.file_name().is_none() {
            return Err(format!("file '{}' has no file name", self.file.display()));
        }
        if self.max_size_bytes == 0 {
            return Err("max_size_bytes must be greater than zero".to_string());
        }
        if self.max_archives == 0 {
            return Err("max_archives must be at least 1".to_string());
        }
        let name = self
            .archive_pattern
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                format!(
                    "archive pattern '{}' needs a UTF-8 file name",
                    self.archive_pattern.display()
                )
            })?;
        if !name.contains(INDEX_TOKEN) {
            return Err(format!("archive pattern '{name}' must contain '{INDEX_TOKEN}'"));
        }
        if self.archive_path(1) == self.file {
            return Err("archive pattern resolves to the active file".to_string());
        }
        Ok(())
    }
}

fn default_max_archives() -> u32 {
    DEFAULT_MAX_ARCHIVES
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> RollingFileSpec {
        RollingFileSpec::new("/logs/acme.log", "/logs/acme-%i.zip", 1024)
    }

    #[test]
    fn test_archive_path_substitutes_index() {
        let spec = spec();
        assert_eq!(spec.archive_path(1), PathBuf::from("/logs/acme-1.zip"));
        assert_eq!(spec.archive_path(12), PathBuf::from("/logs/acme-12.zip"));
        assert_eq!(spec.archive_entry_name(3), "acme-3.log");
    }

    #[test]
    fn test_rolling_defaults() {
        let spec = spec();
        assert!(spec.append);
        assert!(spec.buffered);
        assert!(spec.immediate_flush);
        assert_eq!(spec.max_archives, DEFAULT_MAX_ARCHIVES);
    }

    #[test]
    fn test_validation_rejects_bad_rolling_specs() {
        let missing_token = RollingFileSpec::new("/logs/a.log", "/logs/a.zip", 10);
        assert!(missing_token.validate().unwrap_err().contains("%i"));

        let zero_size = RollingFileSpec::new("/logs/a.log", "/logs/a-%i.zip", 0);
        assert!(zero_size.validate().is_err());

        let zero_archives = spec().with_max_archives(0);
        assert!(zero_archives.validate().is_err());

        assert!(spec().validate().is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let appender = AppenderSpec::console("  ", ConsoleSpec::default());
        assert!(appender.validate().is_err());
    }
}
