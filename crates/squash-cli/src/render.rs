//! Report rendering: indented text, JSON, and the machine-readable summary.

use std::io::Write;
use std::mem;

use anyhow::Result;
use chrono::Duration;
use serde::Serialize;
use squash_core::{ReportEvent, Summary, format_utc};

const TIME_FORMAT: &str = "%H:%M";

/// Formats a duration as fractional hours, e.g. `1.5 hours.`
#[allow(clippy::cast_precision_loss)]
pub fn format_hours(duration: Duration) -> String {
    let hours = duration.num_milliseconds() as f64 / 3_600_000.0;
    format!("{hours:.1} hours.")
}

// ========== Text Output ==========

/// Writes the indented human-readable report.
pub fn write_text<W: Write>(writer: &mut W, events: &[ReportEvent], summary: &Summary) -> Result<()> {
    for event in events {
        match event {
            ReportEvent::DayStarted { label } => writeln!(writer, "      Spans for {label}:")?,
            ReportEvent::Span {
                start,
                end,
                duration,
            } => writeln!(
                writer,
                "    {} -> {}: {}",
                start.format(TIME_FORMAT),
                end.format(TIME_FORMAT),
                format_hours(*duration)
            )?,
            ReportEvent::DayTotal(day) => writeln!(
                writer,
                "    Total for {}: {}",
                day.label,
                format_hours(day.total)
            )?,
            ReportEvent::MonthTotal(month) => writeln!(
                writer,
                "  Total for {}: {}",
                month.label,
                format_hours(month.total)
            )?,
            ReportEvent::YearTotal(year) => writeln!(
                writer,
                "Total for {}: {}",
                year.label,
                format_hours(year.total)
            )?,
        }
    }

    if !summary.is_empty() {
        writeln!(writer, "Overall: {}", format_hours(summary.total))?;
    }
    Ok(())
}

// ========== Machine Output ==========

/// Writes total seconds, then the most recent timestamp in UTC if there is one.
pub fn write_mech<W: Write>(writer: &mut W, summary: &Summary) -> Result<()> {
    writeln!(writer, "{}", summary.total_seconds())?;
    if let Some(most_recent) = &summary.most_recent {
        writeln!(writer, "{}", format_utc(most_recent))?;
    }
    Ok(())
}

// ========== JSON Output ==========

/// JSON report structure.
#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub total_seconds: i64,
    pub most_recent: Option<String>,
    pub timezone: String,
    pub years: Vec<JsonYear>,
}

#[derive(Debug, Serialize)]
pub struct JsonYear {
    pub label: String,
    pub seconds: i64,
    pub months: Vec<JsonMonth>,
}

#[derive(Debug, Serialize)]
pub struct JsonMonth {
    pub label: String,
    pub seconds: i64,
    pub days: Vec<JsonDay>,
}

#[derive(Debug, Serialize)]
pub struct JsonDay {
    pub label: String,
    pub seconds: i64,
    /// Empty in quiet mode.
    pub spans: Vec<JsonSpan>,
}

#[derive(Debug, Serialize)]
pub struct JsonSpan {
    pub start: String,
    pub end: String,
    pub seconds: i64,
}

/// Nests the flat event stream into years, months, and days.
///
/// At a year boundary the year total arrives before the total of its last
/// month, so that year is held back until the month closes.
pub fn json_report(events: &[ReportEvent], summary: &Summary, timezone: String) -> JsonReport {
    let mut spans = Vec::new();
    let mut days = Vec::new();
    let mut months = Vec::new();
    let mut years = Vec::new();
    let mut closing_year: Option<JsonYear> = None;

    for event in events {
        match event {
            ReportEvent::DayStarted { .. } => spans.clear(),
            ReportEvent::Span {
                start,
                end,
                duration,
            } => spans.push(JsonSpan {
                start: start.format(TIME_FORMAT).to_string(),
                end: end.format(TIME_FORMAT).to_string(),
                seconds: duration.num_seconds(),
            }),
            ReportEvent::DayTotal(day) => days.push(JsonDay {
                label: day.label.clone(),
                seconds: day.total.num_seconds(),
                spans: mem::take(&mut spans),
            }),
            ReportEvent::MonthTotal(month) => {
                months.push(JsonMonth {
                    label: month.label.clone(),
                    seconds: month.total.num_seconds(),
                    days: mem::take(&mut days),
                });
                if let Some(mut year) = closing_year.take() {
                    year.months.append(&mut months);
                    years.push(year);
                }
            }
            ReportEvent::YearTotal(year) => {
                let year = JsonYear {
                    label: year.label.clone(),
                    seconds: year.total.num_seconds(),
                    months: mem::take(&mut months),
                };
                if days.is_empty() {
                    years.push(year);
                } else {
                    closing_year = Some(year);
                }
            }
        }
    }

    JsonReport {
        total_seconds: summary.total_seconds(),
        most_recent: summary.most_recent.as_ref().map(format_utc),
        timezone,
        years,
    }
}

/// Writes the JSON report followed by a newline.
pub fn write_json<W: Write>(writer: &mut W, report: &JsonReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, report)?;
    writeln!(writer)?;
    Ok(())
}
