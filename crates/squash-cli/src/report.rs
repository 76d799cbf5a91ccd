//! The squash report: resolving settings, running the rollup, and writing output.

use std::io::Write;

use anyhow::{Context, Result};
use squash_core::{
    Discard, DisplayZone, ReportEvent, RollupOptions, SquashConfig, Summary, Timestamp, squash,
};

use crate::input::retain_since;
use crate::render;
use crate::util::parse_datetime;
use crate::{Cli, Config};

/// Where and how the report is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Indented report on stderr.
    Text,
    /// JSON report on stdout.
    Json,
    /// Total seconds and last-seen timestamp on stdout, nothing else.
    Mech,
}

/// Fully validated settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub squash: SquashConfig,
    pub rollup: RollupOptions,
    pub since: Option<Timestamp>,
    pub mode: OutputMode,
}

impl Settings {
    /// Validates the merged configuration and flags.
    ///
    /// Fails before any input is read.
    pub fn resolve(cli: &Cli, config: &Config) -> Result<Self> {
        let squash = config
            .squash_config()
            .context("invalid padding configuration")?;
        let zone = config.display_zone().context("invalid timezone")?;
        let since = cli
            .since
            .as_deref()
            .map(parse_datetime)
            .transpose()
            .context("invalid --since value")?;

        let mode = if cli.mech {
            OutputMode::Mech
        } else if cli.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        Ok(Self {
            squash,
            rollup: RollupOptions {
                zone,
                quiet: cli.quiet,
            },
            since,
            mode,
        })
    }
}

/// Runs the rollup over `timestamps` and writes the report.
pub fn run<O: Write, E: Write>(
    settings: &Settings,
    mut timestamps: Vec<Timestamp>,
    stdout: &mut O,
    stderr: &mut E,
) -> Result<Summary> {
    if let Some(since) = settings.since {
        let dropped = retain_since(&mut timestamps, since);
        tracing::debug!(dropped, since = %since, "applied --since cutoff");
    }

    if settings.mode == OutputMode::Mech {
        let summary = squash(&timestamps, &settings.squash, &settings.rollup, &mut Discard);
        render::write_mech(stdout, &summary)?;
        return Ok(summary);
    }

    let mut events: Vec<ReportEvent> = Vec::new();
    let summary = squash(&timestamps, &settings.squash, &settings.rollup, &mut events);
    if summary.is_empty() {
        tracing::info!("no timestamps to report");
    }

    match settings.mode {
        OutputMode::Json => {
            let report = render::json_report(&events, &summary, zone_name(settings.rollup.zone));
            render::write_json(stdout, &report)?;
        }
        OutputMode::Text | OutputMode::Mech => render::write_text(stderr, &events, &summary)?,
    }

    Ok(summary)
}

/// Human-readable zone name, resolving `local` to the IANA name when possible.
fn zone_name(zone: DisplayZone) -> String {
    match zone {
        DisplayZone::Local => {
            iana_time_zone::get_timezone().unwrap_or_else(|_| zone.to_string())
        }
        other => other.to_string(),
    }
}
