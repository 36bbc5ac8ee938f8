//! Timestamp and temperature unit conversions.

use chrono::{DateTime, Datelike, FixedOffset, Offset, Utc};

use crate::error::SeriesError;

/// 9999-12-31T23:59:59Z
pub const MAX_TIMESTAMP: i64 = 253_402_300_799;

/// e.g. `01 Jan 2021 00:00:00 +0000`
pub const TIMESTAMP_FORMAT: &str = "%d %b %Y %H:%M:%S %z";

/// Formats Unix timestamps in one fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeConverter {
    offset: FixedOffset,
}

impl Default for TimeConverter {
    fn default() -> Self {
        Self::utc()
    }
}

impl TimeConverter {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }

    /// Offset in (possibly fractional) hours, as reported in a document's
    /// `offset` field.
    pub fn from_hours(hours: f64) -> Result<Self, SeriesError> {
        let invalid = || SeriesError::InvalidOffset(hours.to_string());
        if !hours.is_finite() {
            return Err(invalid());
        }
        let seconds = (hours * 3600.0).round() as i32;
        FixedOffset::east_opt(seconds).map(Self::new).ok_or_else(invalid)
    }

    /// Parse `UTC`, `Z` or a `±HH:MM` offset.
    pub fn parse_offset(text: &str) -> Result<Self, SeriesError> {
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("z") {
            return Ok(Self::utc());
        }
        trimmed
            .parse::<FixedOffset>()
            .map(Self::new)
            .map_err(|_| SeriesError::InvalidOffset(text.to_string()))
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn format(&self, timestamp: i64) -> Result<String, SeriesError> {
        if !(0..=MAX_TIMESTAMP).contains(&timestamp) {
            return Err(SeriesError::InvalidTimestamp(timestamp));
        }

        let local = DateTime::from_timestamp(timestamp, 0)
            .ok_or(SeriesError::InvalidTimestamp(timestamp))?
            .with_timezone(&self.offset);

        if local.year() > 9999 {
            return Err(SeriesError::InvalidTimestamp(timestamp));
        }

        Ok(local.format(TIMESTAMP_FORMAT).to_string())
    }
}

#[must_use]
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (5.0 / 9.0) * (fahrenheit - 32.0)
}

#[must_use]
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    (9.0 / 5.0) * celsius + 32.0
}
