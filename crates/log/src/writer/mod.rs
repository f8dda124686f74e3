//! Writer implementations

mod archive;
mod rolling;

// Standard library
use std::io::{self, IsTerminal};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

// External dependencies
use tracing_subscriber::fmt::writer::BoxMakeWriter;

// Internal crates
use crate::config::{AppenderKind, AppenderSpec, ConsoleSpec, ConsoleTarget};

pub use rolling::{RollingFileGuard, RollingFileWriter};

/// Produces the writer that console appenders use instead of process stdio
pub type ConsoleFactory = Arc<dyn Fn() -> BoxMakeWriter + Send + Sync>;

/// A live appender: its name, where bytes go, and whether to highlight
pub(crate) struct Sink {
    pub(crate) name: String,
    pub(crate) writer: BoxMakeWriter,
    pub(crate) ansi: bool,
    /// Set while writes keep failing
    failing: AtomicBool,
}

impl Sink {
    /// Track a write outcome; returns the one line to report when the sink
    /// starts failing or recovers, `None` while nothing changed
    pub(crate) fn record_outcome(&self, outcome: &io::Result<()>) -> Option<String> {
        match outcome {
            Err(error) => (!self.failing.swap(true, Ordering::Relaxed)).then(|| {
                format!(
                    "[lumen-log] appender '{}' failed to write an event: {error}; \
                     further failures are suppressed until it recovers",
                    self.name
                )
            }),
            Ok(()) => self.failing.swap(false, Ordering::Relaxed).then(|| {
                format!("[lumen-log] appender '{}' is writing again", self.name)
            }),
        }
    }
}

impl std::fmt::Debug for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sink")
            .field("name", &self.name)
            .field("ansi", &self.ansi)
            .finish_non_exhaustive()
    }
}

/// Create the sink for one appender
pub(crate) fn make_sink(spec: &AppenderSpec, console: Option<&ConsoleFactory>) -> Sink {
    let (writer, ansi) = match &spec.kind {
        AppenderKind::Console(console_spec) => match console {
            Some(factory) => (factory(), false),
            None => console_writer(*console_spec),
        },
        AppenderKind::RollingFile(file_spec) => (
            BoxMakeWriter::new(RollingFileWriter::new(file_spec.clone())),
            false,
        ),
    };

    Sink {
        name: spec.name.clone(),
        writer,
        ansi,
        failing: AtomicBool::new(false),
    }
}

fn console_writer(spec: ConsoleSpec) -> (BoxMakeWriter, bool) {
    let highlight = spec.highlight && cfg!(feature = "ansi");
    match spec.target {
        ConsoleTarget::Stdout => (
            BoxMakeWriter::new(io::stdout),
            highlight && io::stdout().is_terminal(),
        ),
        ConsoleTarget::Stderr => (
            BoxMakeWriter::new(io::stderr),
            highlight && io::stderr().is_terminal(),
        ),
    }
}
