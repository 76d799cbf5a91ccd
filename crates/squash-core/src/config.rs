//! Padding, merge margin, and display zone configuration.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, FixedOffset, Local, Utc};
use thiserror::Error;

use crate::timestamp::Timestamp;

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Padding would produce spans of zero or negative length.
    #[error(
        "pad after ({after_secs}s) must be later than pad before ({before_secs}s)"
    )]
    PadOrder { before_secs: i64, after_secs: i64 },

    /// The merge margin was negative.
    #[error("merge margin cannot be negative, got {margin_secs}s")]
    NegativeMargin { margin_secs: i64 },

    /// The display zone was not recognized.
    #[error("invalid timezone {value:?}: expected local, utc, recorded, or an offset like +02:00")]
    InvalidZone { value: String },
}

/// How timestamps are padded into spans and when spans merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquashConfig {
    /// Offset added to each timestamp to get its span start. Usually negative.
    pad_before: Duration,

    /// Offset added to each timestamp to get its span end.
    pad_after: Duration,

    /// Largest gap between spans that still merges them.
    margin: Duration,
}

impl Default for SquashConfig {
    fn default() -> Self {
        Self {
            pad_before: Duration::minutes(-5),
            pad_after: Duration::minutes(4),
            margin: Duration::minutes(15),
        }
    }
}

impl SquashConfig {
    /// Creates a validated configuration.
    pub fn new(
        pad_before: Duration,
        pad_after: Duration,
        margin: Duration,
    ) -> Result<Self, ConfigError> {
        if pad_after <= pad_before {
            return Err(ConfigError::PadOrder {
                before_secs: pad_before.num_seconds(),
                after_secs: pad_after.num_seconds(),
            });
        }
        if margin < Duration::zero() {
            return Err(ConfigError::NegativeMargin {
                margin_secs: margin.num_seconds(),
            });
        }
        Ok(Self {
            pad_before,
            pad_after,
            margin,
        })
    }

    /// Convenience constructor taking whole minutes.
    pub fn from_minutes(pad_before: i64, pad_after: i64, margin: i64) -> Result<Self, ConfigError> {
        Self::new(
            Duration::minutes(pad_before),
            Duration::minutes(pad_after),
            Duration::minutes(margin),
        )
    }

    pub const fn pad_before(&self) -> Duration {
        self.pad_before
    }

    pub const fn pad_after(&self) -> Duration {
        self.pad_after
    }

    pub const fn margin(&self) -> Duration {
        self.margin
    }

    /// Length of the span produced by a lone timestamp.
    pub fn span_length(&self) -> Duration {
        self.pad_after - self.pad_before
    }
}

/// Timezone used to render day, month, and year labels.
///
/// Grouping follows these labels, so the same input can split into different
/// days depending on the zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayZone {
    /// The machine's local timezone.
    Local,
    /// UTC.
    Utc,
    /// Each timestamp's own recorded offset.
    #[default]
    Recorded,
    /// A fixed offset from UTC.
    Fixed(FixedOffset),
}

impl DisplayZone {
    /// Converts an instant into this zone, keeping the instant unchanged.
    pub fn localize(&self, timestamp: Timestamp) -> Timestamp {
        match self {
            Self::Local => timestamp.with_timezone(&Local).fixed_offset(),
            Self::Utc => timestamp.with_timezone(&Utc).fixed_offset(),
            Self::Recorded => timestamp,
            Self::Fixed(offset) => timestamp.with_timezone(offset),
        }
    }
}

impl fmt::Display for DisplayZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Utc => write!(f, "utc"),
            Self::Recorded => write!(f, "recorded"),
            Self::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

impl FromStr for DisplayZone {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "utc" | "z" => Ok(Self::Utc),
            "recorded" => Ok(Self::Recorded),
            _ => trimmed
                .parse::<FixedOffset>()
                .map(Self::Fixed)
                .map_err(|_| ConfigError::InvalidZone {
                    value: s.to_string(),
                }),
        }
    }
}
