//! Layer that renders events through the shared layout into every appender

// Standard library
use std::io::Write;

// External dependencies
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::{Context, Layer};

// Internal crates
use crate::layout::Layout;
use crate::writer::Sink;

/// Fan-out layer: captures an event once, renders it once per highlighting
/// mode and hands the same bytes to each attached sink in reference order
#[derive(Debug)]
pub struct AppenderLayer {
    layout: Layout,
    sinks: Vec<Sink>,
}

impl AppenderLayer {
    pub(crate) fn new(layout: Layout, sinks: Vec<Sink>) -> Self {
        Self { layout, sinks }
    }

    /// Names of the attached appenders, in dispatch order
    pub fn appender_names(&self) -> Vec<&str> {
        self.sinks.iter().map(|sink| sink.name.as_str()).collect()
    }
}

impl<S> Layer<S> for AppenderLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if self.sinks.is_empty() {
            return;
        }

        let record = self.layout.capture(event);
        let plain = self.layout.render(&record, false);
        let highlighted = self
            .sinks
            .iter()
            .any(|sink| sink.ansi)
            .then(|| self.layout.render(&record, true));

        for sink in &self.sinks {
            let line = match (&highlighted, sink.ansi) {
                (Some(highlighted), true) => highlighted,
                _ => &plain,
            };
            let mut writer = sink.writer.make_writer_for(event.metadata());
            let outcome = writer.write_all(line.as_bytes());
            drop(writer);
            // Reporting through tracing would re-enter this layer.
            if let Some(report) = sink.record_outcome(&outcome) {
                eprintln!("{report}");
            }
        }
    }
}
