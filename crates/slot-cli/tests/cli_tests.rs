//! Integration tests for the `slots` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the resolve, grid
//! and check-config subcommands through the actual binary.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn slots_cmd() -> Command {
    Command::cargo_bin("slots").unwrap()
}

/// Run `slots resolve` and return the parsed `slots` array.
fn resolve_slots(args: &[&str]) -> Vec<String> {
    let output = slots_cmd().arg("resolve").args(args).output().unwrap();
    assert!(output.status.success(), "resolve failed: {:?}", output);

    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    value["slots"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s.as_str().unwrap().to_string())
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// resolve
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn resolve_default_template() {
    let slots = resolve_slots(&["--date", "2024-06-03"]);
    assert_eq!(slots.len(), 15);
    assert_eq!(slots[0], "08:30");
    assert_eq!(slots[14], "15:30");
}

#[test]
fn resolve_prints_date_and_slots() {
    slots_cmd()
        .args(["resolve", "--date", "2024-06-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""date":"2024-06-02""#))
        .stdout(predicate::str::contains(r#""slots":[]"#));
}

#[test]
fn resolve_with_bookings_and_events() {
    let config = fixture("availability.toml");
    let bookings = fixture("bookings.json");
    let events = fixture("events.json");
    let slots = resolve_slots(&[
        "--date", "2024-06-03", "-c", &config, "-b", &bookings, "-e", &events,
    ]);

    assert_eq!(slots.len(), 12);
    for gone in ["09:00", "10:00", "10:30"] {
        assert!(!slots.contains(&gone.to_string()), "{gone} should be taken");
    }
    assert!(slots.contains(&"09:30".to_string()));
    assert!(slots.contains(&"11:00".to_string()));
}

#[test]
fn resolve_all_day_event_clears_date() {
    let events = fixture("events.json");
    let slots = resolve_slots(&["--date", "2024-06-05", "-e", &events]);
    assert!(slots.is_empty());
}

#[test]
fn unreadable_events_file_is_ignored() {
    let with_missing = resolve_slots(&["--date", "2024-06-03", "-e", "/nonexistent/events.json"]);
    let without = resolve_slots(&["--date", "2024-06-03"]);
    assert_eq!(with_missing, without);
}

#[test]
fn malformed_events_file_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");
    std::fs::write(&path, "{ not json").unwrap();

    let slots = resolve_slots(&["--date", "2024-06-03", "-e", path.to_str().unwrap()]);
    assert_eq!(slots.len(), 15);
}

#[test]
fn resolve_rejects_bad_date_shape() {
    slots_cmd()
        .args(["resolve", "--date", "03/06/2024", "--locale", "en"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains(r#""success":false"#))
        .stdout(predicate::str::contains("YYYY-MM-DD"));
}

#[test]
fn resolve_messages_default_to_hungarian() {
    slots_cmd()
        .args(["resolve", "--date", "03/06/2024"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("ÉÉÉÉ-HH-NN"));
}

#[test]
fn resolve_rejects_impossible_date_in_hungarian() {
    slots_cmd()
        .args(["resolve", "--date", "2024-02-30", "--locale", "hu"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("érvénytelen"));
}

#[test]
fn resolve_missing_bookings_file_fails() {
    slots_cmd()
        .args(["resolve", "--date", "2024-06-03", "-b", "/nonexistent/bookings.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// grid
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn grid_prints_one_label_per_line() {
    slots_cmd()
        .args(["grid", "--open", "09:00", "--close", "10:30"])
        .assert()
        .success()
        .stdout("09:00\n09:30\n10:00\n");
}

#[test]
fn grid_inverted_window_prints_nothing() {
    slots_cmd()
        .args(["grid", "--open", "16:00", "--close", "08:00"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn grid_rejects_malformed_time() {
    slots_cmd()
        .args(["grid", "--open", "nine", "--close", "10:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid time format"));
}

// ─────────────────────────────────────────────────────────────────────────────
// check-config
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_config_summarizes_schedule() {
    slots_cmd()
        .args(["check-config", "-c", &fixture("availability.toml")])
        .assert()
        .success()
        .stdout(predicate::str::contains("time zone: Europe/Budapest"))
        .stdout(predicate::str::contains("Sun: closed"))
        .stdout(predicate::str::contains("Mon: 08:30-16:00 (15 slots)"))
        .stdout(predicate::str::contains("Sat: 09:00-13:00 (8 slots)"));
}

#[test]
fn check_config_reports_malformed_schedule() {
    slots_cmd()
        .args(["check-config", "-c", &fixture("bad_schedule.toml")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("half past eight"));
}
