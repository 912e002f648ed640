//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against a temporary data
//! directory and verify the JSON output.

use std::path::Path;
use std::process::Command;

/// Run a CLI command against the given data dir and return output.
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "focusloop-cli", "--"])
        .args(args)
        .env("FOCUSLOOP_DATA_DIR", data_dir)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(data_dir: &Path, args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "CLI command failed: {args:?}\nstderr: {stderr}");
    serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("bad JSON from {args:?}: {e}\n{stdout}"))
}

#[test]
fn config_show_prints_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = run_json(dir.path(), &["config", "show"]);
    assert_eq!(settings["focus_minutes"], 25);
    assert_eq!(settings["long_break_interval"], 4);
    assert_eq!(settings["sound_enabled"], true);
    assert_eq!(settings["ambient_sound"], "none");
}

#[test]
fn config_set_clamps_out_of_range_values() {
    let dir = tempfile::tempdir().unwrap();
    let settings = run_json(
        dir.path(),
        &["config", "set", "--focus", "0", "--daily-goal", "99"],
    );
    assert_eq!(settings["focus_minutes"], 1);
    assert_eq!(settings["daily_goal"], 20);

    // The clamped values were persisted.
    let reloaded = run_json(dir.path(), &["config", "show"]);
    assert_eq!(reloaded["focus_minutes"], 1);
}

#[test]
fn task_add_and_list_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let task = run_json(
        dir.path(),
        &["task", "add", "Write report", "--pomodoros", "3"],
    );
    assert_eq!(task["title"], "Write report");
    assert_eq!(task["estimated_pomodoros"], 3);
    assert_eq!(task["completed_pomodoros"], 0);

    let tasks = run_json(dir.path(), &["task", "list"]);
    assert_eq!(tasks.as_array().unwrap().len(), 1);
    assert_eq!(tasks[0]["id"], task["id"]);
}

#[test]
fn timer_status_starts_idle_focus() {
    let dir = tempfile::tempdir().unwrap();
    let status = run_json(dir.path(), &["timer", "status"]);
    assert_eq!(status["type"], "StateSnapshot");
    assert_eq!(status["state"], "idle");
    assert_eq!(status["kind"], "focus");
    assert_eq!(status["remaining_secs"], 1500);
    assert_eq!(status["cycle_count"], 0);
}

#[test]
fn timer_start_then_status_survives_restart_as_idle() {
    let dir = tempfile::tempdir().unwrap();
    let started = run_json(dir.path(), &["timer", "start"]);
    assert_eq!(started["type"], "SessionStarted");
    assert_eq!(started["auto"], false);

    // A new process never resumes running state from the snapshot.
    let status = run_json(dir.path(), &["timer", "status"]);
    assert_eq!(status["state"], "idle");
}

#[test]
fn stats_summary_on_empty_log_has_zero_rate() {
    let dir = tempfile::tempdir().unwrap();
    let summary = run_json(dir.path(), &["stats", "summary", "--period", "day"]);
    assert_eq!(summary["total_sessions"], 0);
    assert_eq!(summary["completion_rate"], 0.0);
    assert_eq!(summary["streak"]["current"], 0);
    assert_eq!(summary["type_distribution"].as_array().unwrap().len(), 3);
}

#[test]
fn achievements_list_shows_locked_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let achievements = run_json(dir.path(), &["achievements", "list"]);
    let list = achievements.as_array().unwrap();
    assert_eq!(list.len(), 7);
    assert!(list.iter().all(|a| a["unlocked"] == false));
    assert!(list.iter().any(|a| a["id"] == "century"));
}
