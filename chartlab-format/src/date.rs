//! Date formatting through an injected date-time formatter collaborator.
//!
//! The collaborator renders an epoch-millisecond timestamp in the fixed
//! "MM/DD/YYYY, hh:mm[:ss]" shape; this module only parses that shape and
//! substitutes `YYYY|MM|DD|hh:mm` tokens into a display pattern. Anything
//! the collaborator cannot render comes back as the placeholder.

use crate::PLACEHOLDER;
use chrono::{DateTime, FixedOffset};

/// Default display pattern.
pub const DEFAULT_DATE_PATTERN: &str = "DD-MM hh:mm";

/// Locale-aware date-time renderer, opaque to this module apart from its
/// fixed output shape.
pub trait DateTimeFormatter {
    /// Render as "MM/DD/YYYY, hh:mm[:ss]", or `None` for timestamps the
    /// formatter cannot represent.
    fn render(&self, timestamp_ms: i64) -> Option<String>;
}

/// Bundled collaborator backed by chrono. Renders in UTC unless given a
/// fixed offset.
#[derive(Debug, Clone, Default)]
pub struct ChronoDateTimeFormatter {
    offset: Option<FixedOffset>,
    with_seconds: bool,
}

impl ChronoDateTimeFormatter {
    pub fn utc() -> Self {
        Self::default()
    }

    pub fn with_offset(offset: FixedOffset) -> Self {
        Self {
            offset: Some(offset),
            with_seconds: false,
        }
    }

    pub fn with_seconds(mut self) -> Self {
        self.with_seconds = true;
        self
    }
}

impl DateTimeFormatter for ChronoDateTimeFormatter {
    fn render(&self, timestamp_ms: i64) -> Option<String> {
        let utc = DateTime::from_timestamp_millis(timestamp_ms)?;
        let strftime = if self.with_seconds {
            "%m/%d/%Y, %H:%M:%S"
        } else {
            "%m/%d/%Y, %H:%M"
        };
        Some(match self.offset {
            Some(offset) => utc.with_timezone(&offset).format(strftime).to_string(),
            None => utc.format(strftime).to_string(),
        })
    }
}

/// Substitute `YYYY|MM|DD|hh:mm` tokens in `pattern` with the components of
/// the rendered timestamp. A leading "24" hour is normalized to "00".
pub fn format_date(formatter: &dyn DateTimeFormatter, timestamp_ms: i64, pattern: &str) -> String {
    let Some(rendered) = formatter.render(timestamp_ms) else {
        return PLACEHOLDER.to_string();
    };
    let Some((date_part, time_part)) = rendered.split_once(", ") else {
        return PLACEHOLDER.to_string();
    };
    let mut components = date_part.split('/');
    let (Some(month), Some(day), Some(year)) =
        (components.next(), components.next(), components.next())
    else {
        return PLACEHOLDER.to_string();
    };

    // Some host formatters render midnight as hour 24; charts show 00.
    let time = match time_part.strip_prefix("24") {
        Some(rest) => format!("00{rest}"),
        None => time_part.to_string(),
    };

    pattern
        .replace("YYYY", year)
        .replace("MM", month)
        .replace("DD", day)
        .replace("hh:mm", &time)
}
