//! Timestamp parsing for input lines.
//!
//! Each input line starts with a fixed-width timestamp, either with an explicit
//! numeric offset (`2024-01-15T10:30:00+02:00`) or a literal UTC marker
//! (`2024-01-15T10:30:00Z`). Anything after the timestamp is ignored, so lines
//! such as `git log --format='%aI %s'` output are accepted as-is.

use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat, Utc};
use thiserror::Error;

/// An absolute point in time that keeps the offset it was recorded with.
///
/// Comparison and arithmetic use the absolute instant.
pub type Timestamp = DateTime<FixedOffset>;

/// Format for timestamps carrying an explicit offset.
pub const OFFSET_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Format for timestamps carrying the literal UTC marker.
pub const UTC_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Width of `2006-01-02T15:04:05-07:00`.
const OFFSET_WIDTH: usize = 25;

/// Width of `2006-01-02T15:04:05Z`.
const UTC_WIDTH: usize = 20;

/// Errors from parsing a timestamp line.
#[derive(Debug, Error)]
pub enum TimestampError {
    /// The line is shorter than the timestamp prefix it should start with.
    #[error("line too short for a timestamp (need {expected} bytes): {line:?}")]
    Truncated { line: String, expected: usize },

    /// The prefix did not match the expected format.
    #[error("invalid timestamp {prefix:?}")]
    Malformed {
        prefix: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Parses the timestamp at the start of `line`.
///
/// The UTC form is selected when the byte at the end of the UTC-width prefix is
/// `Z`; otherwise the offset form is expected.
pub fn parse_timestamp(line: &str) -> Result<Timestamp, TimestampError> {
    if line.as_bytes().get(UTC_WIDTH - 1) == Some(&b'Z') {
        let prefix = prefix(line, UTC_WIDTH)?;
        let naive = NaiveDateTime::parse_from_str(prefix, UTC_FORMAT).map_err(|source| {
            TimestampError::Malformed {
                prefix: prefix.to_string(),
                source,
            }
        })?;
        return Ok(naive.and_utc().fixed_offset());
    }

    let prefix = prefix(line, OFFSET_WIDTH)?;
    DateTime::parse_from_str(prefix, OFFSET_FORMAT).map_err(|source| TimestampError::Malformed {
        prefix: prefix.to_string(),
        source,
    })
}

fn prefix(line: &str, width: usize) -> Result<&str, TimestampError> {
    line.get(..width).ok_or_else(|| TimestampError::Truncated {
        line: line.to_string(),
        expected: width,
    })
}

/// Formats a timestamp in UTC as `YYYY-MM-DDTHH:MM:SSZ`.
pub fn format_utc(timestamp: &Timestamp) -> String {
    timestamp
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}
