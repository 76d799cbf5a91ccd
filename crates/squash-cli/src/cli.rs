//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Estimate worked hours from commit timestamps.
///
/// Reads one timestamp per line (e.g. from `git log --format=%aI`), pads each
/// into a short span, merges spans that are close together, and reports the
/// totals per day, month, and year.
#[derive(Debug, Parser)]
#[command(name = "squash", version, about, long_about = None)]
pub struct Cli {
    /// Files to read timestamps from. Reads stdin when empty or `-`.
    pub files: Vec<PathBuf>,

    /// Only show day, month, and year totals.
    #[arg(short, long)]
    pub quiet: bool,

    /// Print total seconds followed by the last time seen, and nothing else.
    #[arg(long, conflicts_with = "json")]
    pub mech: bool,

    /// Print the report as JSON on stdout.
    #[arg(long)]
    pub json: bool,

    /// Only include timestamps at or after this time (ISO 8601 or e.g. "2 weeks ago").
    #[arg(long, value_name = "WHEN")]
    pub since: Option<String>,

    /// Minutes added to each timestamp to get its span start (usually negative).
    #[arg(long, value_name = "MINUTES", allow_negative_numbers = true)]
    pub pad_before: Option<i64>,

    /// Minutes added to each timestamp to get its span end.
    #[arg(long, value_name = "MINUTES", allow_negative_numbers = true)]
    pub pad_after: Option<i64>,

    /// Largest gap in minutes that still merges two spans.
    #[arg(long, value_name = "MINUTES", allow_negative_numbers = true)]
    pub margin: Option<i64>,

    /// Timezone for day boundaries: recorded (each timestamp's own offset, the
    /// default), local, utc, or an offset like +02:00.
    #[arg(long, value_name = "ZONE", allow_hyphen_values = true)]
    pub timezone: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
