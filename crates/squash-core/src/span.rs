//! Span building.
//!
//! Each timestamp is padded into a short interval. Walking the timestamps in
//! ascending order, an interval that starts within `margin` of the current
//! span's end extends that span; otherwise the current span is closed and a new
//! one begins. Span starts never move backwards.

use chrono::Duration;

use crate::config::SquashConfig;
use crate::timestamp::Timestamp;

/// A continuous period of inferred work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl Span {
    /// Span produced by padding a single timestamp.
    fn around(timestamp: Timestamp, config: &SquashConfig) -> Self {
        Self {
            start: timestamp + config.pad_before(),
            end: timestamp + config.pad_after(),
        }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Incremental span builder.
///
/// Timestamps must be pushed in ascending order.
#[derive(Debug, Clone)]
pub struct SpanBuilder {
    config: SquashConfig,
    current: Option<Span>,
    last: Option<Timestamp>,
}

impl SpanBuilder {
    pub const fn new(config: SquashConfig) -> Self {
        Self {
            config,
            current: None,
            last: None,
        }
    }

    /// Adds the next timestamp, returning the span it closed, if any.
    pub fn push(&mut self, timestamp: Timestamp) -> Option<Span> {
        debug_assert!(
            self.last.is_none_or(|last| last <= timestamp),
            "timestamps must be pushed in ascending order"
        );
        self.last = Some(timestamp);

        let candidate = Span::around(timestamp, &self.config);
        let margin = self.config.margin();
        match self.current {
            Some(ref mut current) if candidate.start <= current.end + margin => {
                current.end = candidate.end;
                None
            }
            _ => self.current.replace(candidate),
        }
    }

    /// Closes the open span, if any.
    pub fn finish(self) -> Option<Span> {
        self.current
    }
}

/// Builds the ordered, disjoint spans for a set of timestamps in any order.
pub fn build_spans(timestamps: &[Timestamp], config: &SquashConfig) -> Vec<Span> {
    let mut sorted = timestamps.to_vec();
    sorted.sort_unstable();

    let mut builder = SpanBuilder::new(*config);
    let mut spans: Vec<Span> = sorted.into_iter().filter_map(|t| builder.push(t)).collect();
    spans.extend(builder.finish());
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ts(minutes: i64) -> Timestamp {
        Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0)
            .single()
            .expect("valid test timestamp")
            .fixed_offset()
            + Duration::minutes(minutes)
    }

    fn span(start: i64, end: i64) -> Span {
        Span {
            start: ts(start),
            end: ts(end),
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(build_spans(&[], &SquashConfig::default()).is_empty());
    }

    #[test]
    fn test_single_timestamp_has_fixed_length() {
        let config = SquashConfig::default();
        let spans = build_spans(&[ts(0)], &config);

        assert_eq!(spans, vec![span(-5, 4)]);
        assert_eq!(spans[0].duration(), config.span_length());
    }

    #[test]
    fn test_documented_example() {
        // 10:00, 10:10, 11:00 -> 09:55-10:14 and 10:55-11:04
        let spans = build_spans(&[ts(0), ts(10), ts(60)], &SquashConfig::default());

        assert_eq!(spans, vec![span(-5, 14), span(55, 64)]);
        let total: Duration = spans.iter().map(Span::duration).sum();
        assert_eq!(total, Duration::minutes(28));
    }

    #[test]
    fn test_gap_equal_to_margin_merges() {
        // First span ends at 4; second starts at 4 + 15 = 19 when t = 24.
        let spans = build_spans(&[ts(0), ts(24)], &SquashConfig::default());
        assert_eq!(spans, vec![span(-5, 28)]);
    }

    #[test]
    fn test_gap_over_margin_splits() {
        let config = SquashConfig::default();
        let later = ts(24) + Duration::seconds(1);
        let spans = build_spans(&[ts(0), later], &config);

        assert_eq!(spans.len(), 2);
        let total: Duration = spans.iter().map(Span::duration).sum();
        assert_eq!(total, config.span_length() * 2);
    }

    #[test]
    fn test_merged_duration_spans_first_to_last() {
        let config = SquashConfig::default();
        let spans = build_spans(&[ts(0), ts(20)], &config);

        assert_eq!(spans.len(), 1);
        let expected = (ts(20) + config.pad_after()) - (ts(0) + config.pad_before());
        assert_eq!(spans[0].duration(), expected);
    }

    #[test]
    fn test_order_does_not_matter() {
        let config = SquashConfig::default();
        let sorted = build_spans(&[ts(0), ts(10), ts(60), ts(200)], &config);
        let shuffled = build_spans(&[ts(200), ts(10), ts(0), ts(60)], &config);
        assert_eq!(sorted, shuffled);
    }

    #[test]
    fn test_duplicate_timestamps_collapse() {
        let spans = build_spans(&[ts(0), ts(0), ts(0)], &SquashConfig::default());
        assert_eq!(spans, vec![span(-5, 4)]);
    }

    #[test]
    fn test_offsets_compare_as_instants() {
        // 12:05+02:00 is 10:05Z, so it merges with the 10:00Z span.
        let shifted = crate::parse_timestamp("2025-01-15T12:05:00+02:00").unwrap();
        let spans = build_spans(&[shifted, ts(0)], &SquashConfig::default());

        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].start, ts(-5));
        assert_eq!(spans[0].end, ts(9));
    }

    #[test]
    fn test_zero_margin_only_merges_touching_spans() {
        let config = SquashConfig::from_minutes(-5, 4, 0).unwrap();
        // Candidate for t=9 starts at 4, exactly the previous end.
        let spans = build_spans(&[ts(0), ts(9), ts(19)], &config);
        assert_eq!(spans, vec![span(-5, 13), span(14, 23)]);
    }

    #[test]
    fn test_builder_reports_closed_spans() {
        let mut builder = SpanBuilder::new(SquashConfig::default());
        assert_eq!(builder.push(ts(0)), None);
        assert_eq!(builder.push(ts(10)), None);
        assert_eq!(builder.push(ts(60)), Some(span(-5, 14)));
        assert_eq!(builder.finish(), Some(span(55, 64)));
    }
}
