//! Core logic for estimating worked time from commit timestamps.
//!
//! This crate contains:
//! - Timestamp parsing for the two accepted fixed-width line formats
//! - Span building: padding each timestamp and merging nearby intervals
//! - Rollup: grouping spans by calendar day and totalling days, months, and years

mod config;
pub mod report;
mod rollup;
mod span;
pub mod timestamp;

pub use config::{ConfigError, DisplayZone, SquashConfig};
pub use report::{Discard, PeriodTotal, ReportEvent, ReportSink};
pub use rollup::{RollupOptions, Summary, squash};
pub use span::{Span, SpanBuilder, build_spans};
pub use timestamp::{Timestamp, TimestampError, format_utc, parse_timestamp};
