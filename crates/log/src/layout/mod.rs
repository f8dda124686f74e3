//! Pattern layout
//!
//! A [`LayoutSpec`](crate::LayoutSpec) is compiled into a [`Pattern`] and
//! paired with a timer. Each event is captured once into an `EventRecord`
//! and rendered per appender; the only per-appender difference is level
//! highlighting.

mod pattern;
mod record;

use std::fmt;
use std::sync::Arc;

use tracing_subscriber::fmt::{format::Writer, time::FormatTime};

pub use pattern::Pattern;
pub(crate) use record::EventRecord;

use pattern::{Segment, truncate_logger};

/// Timer shared by a layout
pub type SharedTimer = Arc<dyn FormatTime + Send + Sync>;

/// Compiled layout: pattern plus timestamp source
#[derive(Clone)]
pub struct Layout {
    pattern: Arc<Pattern>,
    timer: SharedTimer,
}

impl fmt::Debug for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layout")
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

impl Layout {
    /// Layout with the default UTC timer
    pub fn new(pattern: Pattern) -> Self {
        Self::with_timer(pattern, Arc::new(crate::format::make_timer()))
    }

    /// Layout with a caller-supplied timer
    pub fn with_timer(pattern: Pattern, timer: SharedTimer) -> Self {
        Self {
            pattern: Arc::new(pattern),
            timer,
        }
    }

    /// Capture an event, stamping it with the current time
    pub(crate) fn capture(&self, event: &tracing::Event<'_>) -> EventRecord {
        let mut timestamp = String::new();
        if self.timer.format_time(&mut Writer::new(&mut timestamp)).is_err() {
            timestamp.clear();
        }
        EventRecord::capture(event, timestamp)
    }

    /// Render a captured event; `ansi` enables level highlighting
    pub(crate) fn render(&self, record: &EventRecord, ansi: bool) -> String {
        let mut out = String::with_capacity(128);
        for segment in &self.pattern.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Level => push_level(&mut out, record.level, ansi),
                Segment::Timestamp => out.push_str(&record.timestamp),
                Segment::Logger(None) => out.push_str(&record.target),
                Segment::Logger(Some(depth)) => {
                    out.push_str(truncate_logger(&record.target, *depth));
                }
                Segment::Message => record.write_message(&mut out),
                Segment::Newline => out.push('\n'),
                Segment::ErrorChain => {
                    for line in &record.error_chain {
                        out.push_str(line);
                        out.push('\n');
                    }
                }
            }
        }
        out
    }
}

#[cfg(feature = "ansi")]
fn push_level(out: &mut String, level: &str, ansi: bool) {
    use colored::Colorize;

    if !ansi {
        out.push_str(level);
        return;
    }
    let painted = match level {
        "ERROR" => level.red().bold(),
        "WARN" => level.yellow(),
        "INFO" => level.green(),
        "DEBUG" => level.blue(),
        _ => level.magenta(),
    };
    out.push_str(&painted.to_string());
}

#[cfg(not(feature = "ansi"))]
fn push_level(out: &mut String, level: &str, _ansi: bool) {
    out.push_str(level);
}
