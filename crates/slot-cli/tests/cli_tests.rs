//! Integration tests for the `slots` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the generate,
//! check, expand and choices subcommands through the actual binary, including
//! stdin piping, file I/O and exit codes.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to a fixture under tests/fixtures.
fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn slots() -> Command {
    Command::cargo_bin("slots").unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// generate
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn generate_prints_labels() {
    slots()
        .args(["generate", "--start", "9:00 AM", "--end", "10:00 AM", "--minutes", "30"])
        .assert()
        .success()
        .stdout("9:00 AM - 9:30 AM\n9:30 AM - 10:00 AM\n");
}

#[test]
fn generate_shortens_final_slot() {
    slots()
        .args(["generate", "--start", "09:00", "--end", "10:00", "--minutes", "45"])
        .assert()
        .success()
        .stdout("9:00 AM - 9:45 AM\n9:45 AM - 10:00 AM\n");
}

#[test]
fn generate_json_emits_submission_values() {
    let output = slots()
        .args([
            "generate", "--start", "1:00 PM", "--end", "3:00 PM", "--hours", "1", "--json",
        ])
        .output()
        .expect("generate should run");
    assert!(output.status.success());

    let values: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        values,
        serde_json::json!([
            {"start": "13:00", "end": "14:00"},
            {"start": "14:00", "end": "15:00"}
        ])
    );
}

#[test]
fn generate_rejects_inverted_window() {
    slots()
        .args(["generate", "--start", "10:00 AM", "--end", "9:00 AM", "--minutes", "30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Time range invalid"));
}

#[test]
fn generate_rejects_zero_duration() {
    slots()
        .args(["generate", "--start", "9:00 AM", "--end", "10:00 AM"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Slot duration invalid"));
}

#[test]
fn generate_rejects_oversized_duration() {
    slots()
        .args(["generate", "--start", "9:00 AM", "--end", "10:00 AM", "--hours", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Slot duration invalid"));
}

#[test]
fn generate_rejects_malformed_time() {
    slots()
        .args(["generate", "--start", "noon", "--end", "10:00 AM", "--minutes", "30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --start"));
}

// ─────────────────────────────────────────────────────────────────────────────
// check
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_accepts_valid_form() {
    slots()
        .args(["check", "-i", &fixture("form_valid.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Form can be submitted"))
        .stdout(predicate::str::contains("1 slot(s) available, 1 selected"));
}

#[test]
fn check_lists_failed_indicators() {
    slots()
        .args(["check", "-i", &fixture("form_invalid.json")])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("date-error"))
        .stdout(predicate::str::contains("time-error"))
        .stdout(predicate::str::contains("selection-error"))
        .stdout(predicate::str::contains("slot-error").not());
}

#[test]
fn check_rejects_selection_outside_generated_slots() {
    slots()
        .args(["check", "-i", &fixture("form_off_window.json")])
        .assert()
        .code(1)
        .stdout("selection-error: Select at least one time slot.\n");
}

#[test]
fn check_reads_stdin() {
    let form = r#"{"start_time": "9:00 AM", "end_time": "10:00 AM",
                   "start_date": "2022-03-27", "end_date": "2022-03-27",
                   "slot_duration_hours": "0", "slot_duration_minutes": "0",
                   "selected_slots": [{"start": "09:00", "end": "10:00"}]}"#;

    slots()
        .arg("check")
        .write_stdin(form)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("slot-error"));
}

#[test]
fn check_rejects_non_json() {
    slots()
        .arg("check")
        .write_stdin("start_time=9:00")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse form JSON"));
}

// ─────────────────────────────────────────────────────────────────────────────
// expand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn expand_creates_one_availability_per_day() {
    let output = slots()
        .args(["expand", "-i", &fixture("form_valid.json")])
        .output()
        .expect("expand should run");
    assert!(output.status.success());

    let availabilities: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(availabilities.len(), 7);
    assert_eq!(availabilities[0]["start"], "2022-03-27T06:00:00");
    assert_eq!(availabilities[6]["end"], "2022-04-02T07:00:00");
}

#[test]
fn expand_writes_output_file() {
    let dir = std::env::temp_dir().join(format!("slots-cli-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let output_path = dir.join("availabilities.json");
    let output_str = output_path.to_str().unwrap();

    slots()
        .args(["expand", "-i", &fixture("form_valid.json"), "-o", output_str])
        .assert()
        .success();

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    let parsed: Vec<serde_json::Value> = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed.len(), 7);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn expand_refuses_invalid_form() {
    slots()
        .args(["expand", "-i", &fixture("form_invalid.json")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Form cannot be submitted"))
        .stderr(predicate::str::contains("date-error"));
}

#[test]
fn expand_refuses_selection_outside_generated_slots() {
    slots()
        .args(["expand", "-i", &fixture("form_off_window.json")])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Form cannot be submitted: selection-error"));
}

#[test]
fn expand_missing_file_fails() {
    slots()
        .args(["expand", "-i", "/nonexistent/form.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// choices / config
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn choices_use_built_in_defaults() {
    slots()
        .arg("choices")
        .assert()
        .success()
        .stdout(predicate::str::contains("  8:00 AM\n  8:15 AM\n"))
        .stdout(predicate::str::contains("11:45 PM"))
        .stdout(predicate::str::contains("15 minutes"))
        .stdout(predicate::str::contains("23 hours"));
}

#[test]
fn choices_honour_config_file() {
    slots()
        .args(["--config", &fixture("config.json"), "choices"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Times:\n  8:00 PM\n  9:00 PM\n  10:00 PM\n  11:00 PM\nDurations:"))
        .stdout(predicate::str::contains("1 hour 30 minutes"))
        .stdout(predicate::str::contains("23 hours").not());
}

#[test]
fn invalid_config_file_fails() {
    slots()
        .args(["--config", &fixture("config_invalid.json"), "choices"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config file"));

    slots()
        .args(["--config", "/nonexistent/config.json", "choices"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}

#[test]
fn config_file_is_only_read_by_choices() {
    slots()
        .args([
            "--config",
            &fixture("config_invalid.json"),
            "generate",
            "--start",
            "9:00 AM",
            "--end",
            "10:00 AM",
            "--minutes",
            "30",
        ])
        .assert()
        .success()
        .stdout("9:00 AM - 9:30 AM\n9:30 AM - 10:00 AM\n");

    slots()
        .args(["--config", "/nonexistent/config.json", "check", "-i", &fixture("form_valid.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Form can be submitted"));
}

#[test]
fn no_subcommand_shows_usage() {
    slots()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
