//! Field capture for a single event

use std::fmt::{self, Write as _};

use tracing::field::{Field, Visit};

/// Field carrying the error rendered by `%ex`
const ERROR_FIELD: &str = "error";

/// Everything a pattern needs from one event, captured once and shared by
/// every appender so they all render the same text
#[derive(Debug, Default)]
pub(crate) struct EventRecord {
    pub(crate) level: &'static str,
    pub(crate) target: String,
    pub(crate) timestamp: String,
    pub(crate) message: String,
    pub(crate) fields: Vec<(&'static str, String)>,
    /// Error followed by each `source()`, outermost first
    pub(crate) error_chain: Vec<String>,
}

impl EventRecord {
    pub(crate) fn capture(event: &tracing::Event<'_>, timestamp: String) -> Self {
        #[cfg(feature = "log-compat")]
        let normalized = tracing_log::NormalizeEvent::normalized_metadata(event);
        #[cfg(feature = "log-compat")]
        let metadata = normalized.as_ref().unwrap_or_else(|| event.metadata());
        #[cfg(not(feature = "log-compat"))]
        let metadata = event.metadata();

        let mut record = Self {
            level: metadata.level().as_str(),
            target: metadata.target().to_string(),
            timestamp,
            ..Self::default()
        };
        event.record(&mut record);
        record
    }

    /// Message followed by ` key=value` for the remaining fields
    pub(crate) fn write_message(&self, out: &mut String) {
        out.push_str(&self.message);
        for (name, value) in &self.fields {
            if !out.is_empty() && !out.ends_with(' ') {
                out.push(' ');
            }
            let _ = write!(out, "{name}={value}");
        }
    }
}

impl Visit for EventRecord {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            name if name.starts_with("log.") => {}
            name => self.fields.push((name, value.to_string())),
        }
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        if field.name() != ERROR_FIELD {
            self.fields.push((field.name(), value.to_string()));
            return;
        }
        self.error_chain.push(value.to_string());
        let mut source = value.source();
        while let Some(cause) = source {
            self.error_chain.push(format!("Caused by: {cause}"));
            source = cause.source();
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{value:?}"),
            name if name.starts_with("log.") => {}
            name => self.fields.push((name, format!("{value:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_message_appends_fields() {
        let record = EventRecord {
            message: "request done".into(),
            fields: vec![("status", "200".into()), ("path", "/api".into())],
            ..EventRecord::default()
        };
        let mut out = String::new();
        record.write_message(&mut out);
        assert_eq!(out, "request done status=200 path=/api");
    }

    #[test]
    fn test_write_message_fields_only() {
        let record = EventRecord {
            fields: vec![("count", "3".into())],
            ..EventRecord::default()
        };
        let mut out = String::new();
        record.write_message(&mut out);
        assert_eq!(out, "count=3");
    }
}
