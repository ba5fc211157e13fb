//! Timestamp parsing strategies.
//!
//! A [`TimestampParser`] tries its formats in order and keeps the first
//! success. The default chain is RFC 3339 (fractional seconds optional,
//! offset required, `T` between date and time) followed by
//! `YYYY-MM-DD HH:MM:SS[.fraction]` read as UTC.

use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDateTime};

use crate::config::ConfigError;
use crate::error::LtsvError;

const DATETIME_PATTERN: &str = "%Y-%m-%d %H:%M:%S%.f";
const RFC3339_STRICT_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";

/// One way of reading a timestamp string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestampFormat {
    /// `2025-01-22T14:42:11.012345+09:00`
    Rfc3339,
    /// `2025-01-22 14:42:11`, optionally with a fraction, interpreted as UTC.
    DateTime,
    /// A chrono strftime pattern without an offset, interpreted as UTC.
    Custom(String),
}

impl TimestampFormat {
    pub fn parse(&self, raw: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
        match self {
            TimestampFormat::Rfc3339 => parse_rfc3339(raw),
            TimestampFormat::DateTime => parse_naive_utc(raw, DATETIME_PATTERN),
            TimestampFormat::Custom(pattern) => parse_naive_utc(raw, pattern),
        }
    }
}

// chrono's RFC 3339 reader also takes a space in place of `T`.
fn parse_rfc3339(raw: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    match raw.as_bytes().get(10) {
        Some(b'T') => DateTime::parse_from_rfc3339(raw),
        _ => DateTime::parse_from_str(raw, RFC3339_STRICT_PATTERN),
    }
}

fn parse_naive_utc(raw: &str, pattern: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, pattern).map(|naive| naive.and_utc().fixed_offset())
}

impl FromStr for TimestampFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Err(ConfigError::EmptyTimestampFormat),
            "rfc3339" => Ok(TimestampFormat::Rfc3339),
            "datetime" => Ok(TimestampFormat::DateTime),
            pattern => Ok(TimestampFormat::Custom(pattern.to_string())),
        }
    }
}

/// Ordered fallback over a non-empty list of [`TimestampFormat`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampParser {
    formats: Vec<TimestampFormat>,
}

impl Default for TimestampParser {
    fn default() -> Self {
        Self {
            formats: vec![TimestampFormat::Rfc3339, TimestampFormat::DateTime],
        }
    }
}

impl TimestampParser {
    pub fn new(formats: Vec<TimestampFormat>) -> Result<Self, ConfigError> {
        if formats.is_empty() {
            return Err(ConfigError::NoTimestampFormats);
        }
        Ok(Self { formats })
    }

    pub fn formats(&self) -> &[TimestampFormat] {
        &self.formats
    }

    /// Parse `raw` with the first format that accepts it. When every format
    /// rejects it, the error carries the last format's failure.
    pub fn parse(&self, raw: &str) -> Result<DateTime<FixedOffset>, LtsvError> {
        let mut last = None;
        for format in &self.formats {
            match format.parse(raw) {
                Ok(ts) => return Ok(ts),
                Err(e) => last = Some(e),
            }
        }
        Err(LtsvError::InvalidTimestamp {
            value: Some(raw.to_string()),
            cause: last,
        })
    }
}
