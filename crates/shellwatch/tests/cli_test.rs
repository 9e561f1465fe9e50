//! Integration tests for the `shellwatch` binary.
//!
//! These exercise argument parsing, help output, and error handling
//! without talking to a live cloud shard.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `shellwatch` binary with env isolation.
///
/// Clears all `SHELLY_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn shellwatch_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("shellwatch");
    cmd.env("HOME", "/tmp/shellwatch-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/shellwatch-cli-test-nonexistent")
        .env_remove("SHELLY_ACCOUNT")
        .env_remove("SHELLY_SERVER")
        .env_remove("SHELLY_TOKEN")
        .env_remove("SHELLY_TIMEOUT")
        .env_remove("SHELLY_OUTPUT");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = shellwatch_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    shellwatch_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("Shelly Cloud")
            .and(predicate::str::contains("devices"))
            .and(predicate::str::contains("read"))
            .and(predicate::str::contains("watch"))
            .and(predicate::str::contains("validate")),
    );
}

#[test]
fn test_version_flag() {
    shellwatch_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("shellwatch"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = shellwatch_cmd().arg("foobar").output().unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid subcommand"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_devices_no_account() {
    shellwatch_cmd().arg("devices").assert().failure().stderr(
        predicate::str::contains("account")
            .or(predicate::str::contains("Account"))
            .or(predicate::str::contains("config")),
    );
}

#[test]
fn test_read_requires_device_id() {
    let output = shellwatch_cmd().arg("read").output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected usage exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("required") || text.contains("Usage"),
        "Expected missing-argument error:\n{text}"
    );
}

#[test]
fn test_invalid_output_format() {
    let output = shellwatch_cmd()
        .args(["--output", "invalid", "devices"])
        .output()
        .unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid output format"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid")
            || text.contains("possible values")
            || text.contains("valid value"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn test_invalid_measurement() {
    let output = shellwatch_cmd()
        .args(["read", "shellyht-AA001122", "bogus"])
        .output()
        .unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for unknown measurement"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("possible values"),
        "Expected error about valid measurements:\n{text}"
    );
}

#[test]
fn test_global_flags_parsing() {
    // All flags should parse correctly — the failure must be about the
    // missing account, not about argument parsing.
    let output = shellwatch_cmd()
        .args(["--output", "json", "--verbose", "--timeout", "60", "devices"])
        .output()
        .unwrap();
    assert_ne!(output.status.code(), Some(2), "Flags should parse cleanly");
    assert!(!output.status.success(), "Expected account lookup failure");
}

// ── Config subcommands ──────────────────────────────────────────────

#[test]
fn test_config_path_prints_location() {
    shellwatch_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("shellwatch"));
}

#[test]
fn test_config_show_without_file() {
    // `config show` renders the defaults when no file exists.
    shellwatch_cmd().args(["config", "show"]).assert().success();
}

// ── Subcommand help discovery ───────────────────────────────────────

#[test]
fn test_watch_help_mentions_updates_limit() {
    shellwatch_cmd()
        .args(["watch", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("updates"));
}

#[test]
fn test_config_subcommands_exist() {
    shellwatch_cmd()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("path").and(predicate::str::contains("show")));
}
