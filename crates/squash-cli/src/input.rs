//! Reading timestamps from stdin or files.
//!
//! Unparseable lines are logged and skipped; they never abort the run.
//! Read failures do.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use squash_core::{Timestamp, parse_timestamp};

/// Reads timestamps from every input, or from stdin when `files` is empty.
///
/// A path of `-` also means stdin.
pub fn read_inputs(files: &[PathBuf]) -> Result<Vec<Timestamp>> {
    if files.is_empty() {
        return read_timestamps(io::stdin().lock(), "<stdin>");
    }

    let mut timestamps = Vec::new();
    for path in files {
        if path.as_os_str() == "-" {
            timestamps.extend(read_timestamps(io::stdin().lock(), "<stdin>")?);
        } else {
            timestamps.extend(read_file(path)?);
        }
    }
    Ok(timestamps)
}

fn read_file(path: &Path) -> Result<Vec<Timestamp>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    read_timestamps(BufReader::new(file), &path.display().to_string())
}

/// Parses one timestamp per line, skipping blank and unparseable lines.
pub fn read_timestamps<R: BufRead>(reader: R, source: &str) -> Result<Vec<Timestamp>> {
    let mut timestamps = Vec::new();
    let mut skipped = 0_usize;

    for (idx, line) in reader.split(b'\n').enumerate() {
        let line = line.with_context(|| format!("failed to read line {} of {source}", idx + 1))?;
        let line = String::from_utf8_lossy(&line);
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        match parse_timestamp(line) {
            Ok(timestamp) => timestamps.push(timestamp),
            Err(err) => {
                skipped += 1;
                tracing::warn!(
                    source,
                    line = idx + 1,
                    error = %err,
                    "skipping unparseable timestamp"
                );
            }
        }
    }

    tracing::debug!(source, parsed = timestamps.len(), skipped, "read timestamps");
    Ok(timestamps)
}

/// Drops timestamps before `since`. A timestamp equal to `since` is kept.
///
/// Returns the number of timestamps dropped.
pub fn retain_since(timestamps: &mut Vec<Timestamp>, since: Timestamp) -> usize {
    let before = timestamps.len();
    timestamps.retain(|timestamp| *timestamp >= since);
    before - timestamps.len()
}
