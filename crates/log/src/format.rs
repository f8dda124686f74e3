//! Format utilities (time)

use std::fmt;

use time::OffsetDateTime;
use time::macros::format_description;
use tracing_subscriber::fmt::{format::Writer, time::FormatTime};

/// UTC wall clock rendered as `YYYY-MM-DD HH:MM:SS.mmm`
#[derive(Debug, Clone, Copy, Default)]
pub struct UtcTimestamp;

impl UtcTimestamp {
    /// Render an instant the way [`FormatTime::format_time`] renders now
    pub fn render(instant: OffsetDateTime) -> Result<String, time::error::Format> {
        instant.format(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]"
        ))
    }
}

impl FormatTime for UtcTimestamp {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        let rendered = Self::render(OffsetDateTime::now_utc()).map_err(|_| fmt::Error)?;
        w.write_str(&rendered)
    }
}

/// Timer used by layouts unless a caller supplies its own
pub fn make_timer() -> UtcTimestamp {
    UtcTimestamp
}
