//! Calendar rollup of spans.
//!
//! Spans arrive in ascending order and are grouped by the calendar day of
//! their start, rendered in the display zone. Completing a day rolls its total
//! into the running month and year totals. When the next day belongs to a new
//! month the month total is flushed before that day is listed; if it also
//! belongs to a new year, the year total is flushed ahead of the month total.
//! End of input flushes day, month, and year in that order.
//!
//! Month and year boundaries are detected by comparing their rendered labels
//! (`Jan 2006`, `2006`). Days are keyed by calendar date, since the day label
//! (`Mon Jan 02`) carries no year: two consecutive days that render the same
//! label in different years (say Jan 02 2017 and Jan 02 2023, both Mondays)
//! are reported as separate days rather than merged into one.

use std::mem;

use chrono::{Duration, NaiveDate};

use crate::config::{DisplayZone, SquashConfig};
use crate::report::{PeriodTotal, ReportEvent, ReportSink};
use crate::span::{Span, SpanBuilder};
use crate::timestamp::Timestamp;

const YEAR_FORMAT: &str = "%Y";
const MONTH_FORMAT: &str = "%b %Y";
const DAY_FORMAT: &str = "%a %b %d";

/// Presentation options for the rollup.
#[derive(Debug, Clone, Copy, Default)]
pub struct RollupOptions {
    /// Zone used for day, month, and year boundaries and labels.
    pub zone: DisplayZone,

    /// Skip per-day span listings; totals are still emitted.
    pub quiet: bool,
}

/// Result of squashing a set of timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Sum of all span durations.
    pub total: Duration,

    /// Latest input timestamp, `None` for empty input.
    pub most_recent: Option<Timestamp>,

    /// Number of spans after merging.
    pub spans: usize,

    /// Number of distinct days with work.
    pub days: usize,
}

impl Summary {
    pub const fn is_empty(&self) -> bool {
        self.most_recent.is_none()
    }

    /// Total in whole seconds, truncated.
    pub fn total_seconds(&self) -> i64 {
        self.total.num_seconds()
    }
}

/// Running total for one calendar level.
#[derive(Debug)]
struct Level {
    label: Option<String>,
    total: Duration,
}

impl Level {
    const fn new() -> Self {
        Self {
            label: None,
            total: Duration::zero(),
        }
    }

    fn is_tracking(&self, label: &str) -> bool {
        self.label.as_deref() == Some(label)
    }

    fn add(&mut self, label: &str, duration: Duration) {
        if !self.is_tracking(label) {
            self.label = Some(label.to_string());
        }
        self.total += duration;
    }

    /// Takes the accumulated total. Empty levels yield nothing.
    fn flush(&mut self) -> Option<PeriodTotal> {
        let label = self.label.take();
        let total = mem::replace(&mut self.total, Duration::zero());
        if total.is_zero() {
            return None;
        }
        Some(PeriodTotal { label: label?, total })
    }
}

/// Spans sharing one calendar day in the display zone.
#[derive(Debug)]
struct DayGroup {
    date: NaiveDate,
    label: String,
    month: String,
    year: String,
    spans: Vec<Span>,
}

impl DayGroup {
    fn starting_at(start: &Timestamp) -> Self {
        Self {
            date: start.date_naive(),
            label: start.format(DAY_FORMAT).to_string(),
            month: start.format(MONTH_FORMAT).to_string(),
            year: start.format(YEAR_FORMAT).to_string(),
            spans: Vec::new(),
        }
    }

    fn total(&self) -> Duration {
        self.spans.iter().map(Span::duration).sum()
    }
}

struct Rollup<'a, S: ReportSink + ?Sized> {
    options: &'a RollupOptions,
    sink: &'a mut S,
    day: Option<DayGroup>,
    month: Level,
    year: Level,
    total: Duration,
    spans: usize,
    days: usize,
}

impl<'a, S: ReportSink + ?Sized> Rollup<'a, S> {
    fn new(options: &'a RollupOptions, sink: &'a mut S) -> Self {
        Self {
            options,
            sink,
            day: None,
            month: Level::new(),
            year: Level::new(),
            total: Duration::zero(),
            spans: 0,
            days: 0,
        }
    }

    fn push_span(&mut self, span: Span) {
        let local = Span {
            start: self.options.zone.localize(span.start),
            end: self.options.zone.localize(span.end),
        };

        if self
            .day
            .as_ref()
            .is_some_and(|day| day.date != local.start.date_naive())
        {
            self.flush_day();
        }

        self.day
            .get_or_insert_with(|| DayGroup::starting_at(&local.start))
            .spans
            .push(local);
        self.spans += 1;
    }

    fn flush_day(&mut self) {
        let Some(day) = self.day.take() else {
            return;
        };

        if !self.month.is_tracking(&day.month) {
            if !self.year.is_tracking(&day.year) {
                self.flush_year();
            }
            self.flush_month();
        }

        if !self.options.quiet {
            self.sink.record(ReportEvent::DayStarted {
                label: day.label.clone(),
            });
            for span in &day.spans {
                self.sink.record(ReportEvent::Span {
                    start: span.start,
                    end: span.end,
                    duration: span.duration(),
                });
            }
        }

        let total = day.total();
        self.month.add(&day.month, total);
        self.year.add(&day.year, total);
        self.total += total;
        self.days += 1;

        self.sink.record(ReportEvent::DayTotal(PeriodTotal {
            label: day.label,
            total,
        }));
    }

    fn flush_month(&mut self) {
        if let Some(total) = self.month.flush() {
            self.sink.record(ReportEvent::MonthTotal(total));
        }
    }

    fn flush_year(&mut self) {
        if let Some(total) = self.year.flush() {
            self.sink.record(ReportEvent::YearTotal(total));
        }
    }

    fn finish(mut self, most_recent: Option<Timestamp>) -> Summary {
        self.flush_day();
        self.flush_month();
        self.flush_year();

        Summary {
            total: self.total,
            most_recent,
            spans: self.spans,
            days: self.days,
        }
    }
}

/// Estimates worked time for `timestamps`, reporting each level to `sink`.
///
/// Timestamps may arrive in any order.
pub fn squash<S: ReportSink + ?Sized>(
    timestamps: &[Timestamp],
    config: &SquashConfig,
    options: &RollupOptions,
    sink: &mut S,
) -> Summary {
    let mut sorted = timestamps.to_vec();
    sorted.sort_unstable();
    let most_recent = sorted.last().copied();

    let mut builder = SpanBuilder::new(*config);
    let mut rollup = Rollup::new(options, sink);
    for timestamp in sorted {
        if let Some(span) = builder.push(timestamp) {
            rollup.push_span(span);
        }
    }
    if let Some(span) = builder.finish() {
        rollup.push_span(span);
    }

    let summary = rollup.finish(most_recent);
    tracing::debug!(
        timestamps = timestamps.len(),
        spans = summary.spans,
        days = summary.days,
        total_secs = summary.total_seconds(),
        "squashed timestamps"
    );
    summary
}
