//! Structured report events emitted while rolling up spans.

use chrono::Duration;

use crate::timestamp::Timestamp;

/// A finished total for one day, month, or year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodTotal {
    /// Display label, e.g. `Mon Jan 02`, `Jan 2006`, or `2006`.
    pub label: String,
    pub total: Duration,
}

/// One entry in the report, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    /// Start of the span listing for a day. Omitted in quiet mode.
    DayStarted { label: String },

    /// One span of the day being listed. Omitted in quiet mode.
    ///
    /// `start` and `end` are already converted into the display zone.
    Span {
        start: Timestamp,
        end: Timestamp,
        duration: Duration,
    },

    DayTotal(PeriodTotal),
    MonthTotal(PeriodTotal),
    YearTotal(PeriodTotal),
}

/// Receives report events as the rollup produces them.
pub trait ReportSink {
    fn record(&mut self, event: ReportEvent);
}

impl ReportSink for Vec<ReportEvent> {
    fn record(&mut self, event: ReportEvent) {
        self.push(event);
    }
}

/// A sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl ReportSink for Discard {
    fn record(&mut self, _event: ReportEvent) {}
}
