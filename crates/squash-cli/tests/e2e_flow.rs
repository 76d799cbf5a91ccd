//! End-to-end tests for the squash binary.
//!
//! Each test runs the real binary with an isolated config directory, feeds
//! timestamps on stdin or through files, and checks stdout and stderr.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn squash_binary() -> String {
    env!("CARGO_BIN_EXE_squash").to_string()
}

/// Builds a command that ignores the user's config and environment.
fn squash_command(home: &Path) -> Command {
    let mut command = Command::new(squash_binary());
    command
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("RUST_LOG")
        .env_remove("SQUASH_PAD_BEFORE_MINUTES")
        .env_remove("SQUASH_PAD_AFTER_MINUTES")
        .env_remove("SQUASH_MARGIN_MINUTES")
        .env_remove("SQUASH_TIMEZONE");
    command
}

/// Runs squash with `args`, writing `stdin` to it.
fn run_squash(home: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = squash_command(home)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn squash");

    // The binary may exit before reading stdin when arguments are rejected.
    let _ = child.stdin.take().unwrap().write_all(stdin.as_bytes());

    child.wait_with_output().expect("failed to wait for squash")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

const EXAMPLE: &str = "2024-01-15T10:00:00Z\n2024-01-15T10:10:00Z\n2024-01-15T11:00:00Z\n";

#[test]
fn test_mech_output() {
    let temp = TempDir::new().unwrap();
    let output = run_squash(temp.path(), &["--mech"], EXAMPLE);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "1680\n2024-01-15T11:00:00Z\n");
    assert!(output.stderr.is_empty());
}

#[test]
fn test_mech_output_with_offsets() {
    let temp = TempDir::new().unwrap();
    let input = "2024-01-15T10:00:00Z\n2024-01-15T12:10:00+02:00\n2024-01-15T06:00:00-05:00\n";
    let output = run_squash(temp.path(), &["--mech"], input);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "1680\n2024-01-15T11:00:00Z\n");
}

#[test]
fn test_empty_input() {
    let temp = TempDir::new().unwrap();

    let output = run_squash(temp.path(), &["--mech"], "");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "0\n");

    let output = run_squash(temp.path(), &[], "");
    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(!stderr(&output).contains("Overall"));
}

#[test]
fn test_bad_lines_are_skipped() {
    let temp = TempDir::new().unwrap();
    let input = "garbage\n2024-01-15T10:00:00Z\n\n2024-13-45T99:00:00Z\n2024-01-15T10:10:00Z\n";
    let output = run_squash(temp.path(), &["--timezone", "utc"], input);

    assert!(output.status.success());
    let err = stderr(&output);
    assert!(err.contains("skipping unparseable timestamp"), "stderr: {err}");
    assert!(err.contains("    09:55 -> 10:14: 0.3 hours.\n"));
}

#[test]
fn test_text_report() {
    let temp = TempDir::new().unwrap();
    let output = run_squash(temp.path(), &["--timezone", "utc"], EXAMPLE);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert_eq!(
        stderr(&output),
        "      Spans for Mon Jan 15:
    09:55 -> 10:14: 0.3 hours.
    10:55 -> 11:04: 0.1 hours.
    Total for Mon Jan 15: 0.5 hours.
  Total for Jan 2024: 0.5 hours.
Total for 2024: 0.5 hours.
Overall: 0.5 hours.
"
    );
}

#[test]
fn test_quiet_text_report() {
    let temp = TempDir::new().unwrap();
    let output = run_squash(temp.path(), &["-q", "--timezone", "utc"], EXAMPLE);

    assert!(output.status.success());
    let err = stderr(&output);
    assert!(!err.contains("Spans for"));
    assert!(err.contains("Total for Mon Jan 15"));
}

#[test]
fn test_json_report() {
    let temp = TempDir::new().unwrap();
    let output = run_squash(temp.path(), &["--json", "--timezone", "+01:00"], EXAMPLE);

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["total_seconds"], 1680);
    assert_eq!(report["most_recent"], "2024-01-15T11:00:00Z");
    assert_eq!(report["timezone"], "+01:00");

    let day = &report["years"][0]["months"][0]["days"][0];
    assert_eq!(day["label"], "Mon Jan 15");
    assert_eq!(day["spans"][0]["start"], "10:55");
}

#[test]
fn test_since_is_inclusive() {
    let temp = TempDir::new().unwrap();
    let output = run_squash(
        temp.path(),
        &["--mech", "--since", "2024-01-15T11:00:00Z"],
        EXAMPLE,
    );

    assert!(output.status.success());
    assert_eq!(stdout(&output), "540\n2024-01-15T11:00:00Z\n");
}

#[test]
fn test_alternate_padding_flags() {
    let temp = TempDir::new().unwrap();
    let output = run_squash(
        temp.path(),
        &["--mech", "--pad-before", "-6", "--pad-after", "3"],
        "2024-01-15T10:00:00Z\n",
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "540\n2024-01-15T10:00:00Z\n");
}

#[test]
fn test_invalid_padding_fails() {
    let temp = TempDir::new().unwrap();
    let output = run_squash(
        temp.path(),
        &["--mech", "--pad-before", "5", "--pad-after", "-5"],
        EXAMPLE,
    );

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_unknown_flag_fails() {
    let temp = TempDir::new().unwrap();
    let output = run_squash(temp.path(), &["--bogus"], EXAMPLE);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_mech_and_json_conflict() {
    let temp = TempDir::new().unwrap();
    let output = run_squash(temp.path(), &["--mech", "--json"], EXAMPLE);

    assert!(!output.status.success());
}

#[test]
fn test_reads_files() {
    let temp = TempDir::new().unwrap();
    let first = temp.path().join("first.txt");
    let second = temp.path().join("second.txt");
    std::fs::write(&first, "2024-01-15T10:00:00Z\n2024-01-15T10:10:00Z\n").unwrap();
    std::fs::write(&second, "2024-01-15T11:00:00Z\n").unwrap();

    let output = run_squash(
        temp.path(),
        &["--mech", first.to_str().unwrap(), second.to_str().unwrap()],
        "",
    );

    assert!(output.status.success());
    assert_eq!(stdout(&output), "1680\n2024-01-15T11:00:00Z\n");
}

#[test]
fn test_missing_file_fails() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing.txt");
    let output = run_squash(temp.path(), &["--mech", missing.to_str().unwrap()], "");

    assert!(!output.status.success());
    assert!(stderr(&output).contains("failed to open"));
}

#[test]
fn test_config_file_is_used() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("squash.toml");
    std::fs::write(&config, "pad_before_minutes = -6\npad_after_minutes = 3\n").unwrap();

    let output = run_squash(
        temp.path(),
        &["--mech", "--config", config.to_str().unwrap()],
        "2024-01-15T10:00:00Z\n",
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "540\n2024-01-15T10:00:00Z\n");
}

#[test]
fn test_default_zone_uses_recorded_offsets() {
    let temp = TempDir::new().unwrap();
    let mut child = squash_command(temp.path())
        .env("TZ", "America/Los_Angeles")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn squash");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"2024-01-16T02:00:00Z\n2024-01-16T09:00:00+05:30\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let err = stderr(&output);
    assert!(err.starts_with("      Spans for Tue Jan 16:\n"), "stderr: {err}");
    assert!(err.contains("    01:55 -> 02:04: 0.1 hours.\n"));
    assert!(err.contains("    08:55 -> 09:04: 0.1 hours.\n"));
    assert!(!err.contains("Mon Jan 15"));
}
