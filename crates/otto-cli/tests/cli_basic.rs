//! Basic CLI E2E tests.
//!
//! Each test runs the `otto` binary against its own temporary home
//! directory, so config and state never leak between tests. No test needs
//! network access.

use std::path::Path;
use std::process::Command;

/// Run a CLI command with `home` as the home directory.
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_otto"))
        .args(args)
        .env("HOME", home)
        .env("OTTO_ENV", "dev")
        .env_remove("OTTO_API_KEY")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn home() -> tempfile::TempDir {
    tempfile::tempdir().expect("tempdir")
}

fn plan_every_day(home: &Path) {
    for day in ["mo", "tu", "we", "th", "fr", "sa", "su"] {
        let (stdout, _, code) = run_cli(
            home,
            &[
                "plan", "set", day, "--field1", "mobility", "--field2", "yoga", "--field3",
                "ballet",
            ],
        );
        assert_eq!(code, 0);
        assert!(stdout.contains("Selections saved."));
    }
}

#[test]
fn test_config_get_default_key() {
    let home = home();
    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "generation.api_key"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "REPLACE_WITH_KEY");
}

#[test]
fn test_config_set_then_get() {
    let home = home();
    let (_, _, code) = run_cli(
        home.path(),
        &["config", "set", "generation.model_id", "gemini-test"],
    );
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(home.path(), &["config", "get", "generation.model_id"]);
    assert_eq!(stdout.trim(), "gemini-test");
}

#[test]
fn test_config_unknown_key_fails() {
    let home = home();
    let (_, stderr, code) = run_cli(home.path(), &["config", "get", "generation.nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_config_list() {
    let home = home();
    let (stdout, _, code) = run_cli(home.path(), &["config", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("storage.state_key = otto-state"));
}

#[test]
fn test_plan_set_and_show_json() {
    let home = home();
    let (stdout, _, code) = run_cli(
        home.path(),
        &["plan", "set", "mo", "--field1", "aerobics", "--field2", "rowing"],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("Select all three fields."));

    let (stdout, _, _) = run_cli(home.path(), &["plan", "set", "mo", "--field3", "walking"]);
    assert!(stdout.contains("Selections saved."));

    let (stdout, _, code) = run_cli(home.path(), &["plan", "show", "--json"]);
    assert_eq!(code, 0);
    let rows: serde_json::Value = serde_json::from_str(&stdout).expect("json");
    let rows = rows.as_array().expect("array");
    assert_eq!(rows.len(), 7);
    assert_eq!(rows[0]["field2"], "rowing");
    assert_eq!(rows[0]["valid"], true);
    assert_eq!(rows[1]["valid"], false);
}

#[test]
fn test_plan_new_primary_clears_other_fields() {
    let home = home();
    run_cli(
        home.path(),
        &["plan", "set", "tu", "--field1", "weightlifting", "--field2", "push", "--field3", "core"],
    );
    run_cli(home.path(), &["plan", "set", "tu", "--field1", "bodyweight"]);
    let (stdout, _, _) = run_cli(home.path(), &["plan", "show", "--json"]);
    let rows: serde_json::Value = serde_json::from_str(&stdout).expect("json");
    assert_eq!(rows[1]["field1"], "bodyweight");
    assert!(rows[1]["field2"].is_null());
    assert!(rows[1]["field3"].is_null());
}

#[test]
fn test_plan_rejects_bad_day() {
    let home = home();
    let (_, _, code) = run_cli(home.path(), &["plan", "set", "9", "--field1", "mix"]);
    assert_eq!(code, 1);
    let (_, _, code) = run_cli(home.path(), &["plan", "clear", "someday"]);
    assert_eq!(code, 1);
}

#[test]
fn test_plan_options() {
    let home = home();
    let (stdout, _, code) = run_cli(home.path(), &["plan", "options"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.lines().count(), 9);
    let (stdout, _, _) = run_cli(home.path(), &["plan", "options", "rest day"]);
    assert!(stdout.lines().any(|l| l == "meditation"));
}

#[test]
fn test_generate_without_key_fails_fast() {
    let home = home();
    plan_every_day(home.path());
    let (_, stderr, code) = run_cli(home.path(), &["generate"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("not configured"));
    assert!(!stderr.contains("otto retry"));
}

#[test]
fn test_generate_without_plan_is_a_no_op() {
    let home = home();
    let (stdout, _, code) = run_cli(home.path(), &["generate"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("training focus"));
}

#[test]
fn test_route_out_of_week_day_goes_to_profile() {
    let home = home();
    let (stdout, _, code) = run_cli(home.path(), &["route", "profile/day/2099-01-01"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.lines().next(), Some("#/profile"));
}

#[test]
fn test_route_unknown_goes_home() {
    let home = home();
    let (stdout, _, _) = run_cli(home.path(), &["route", "#/settings"]);
    assert_eq!(stdout.lines().next(), Some("#/home"));
}

#[test]
fn test_submit_without_challenge_fails() {
    let home = home();
    let (_, _, code) = run_cli(home.path(), &["submit"]);
    assert_eq!(code, 1);
    let (_, _, code) = run_cli(home.path(), &["dial", "set", "5"]);
    assert_eq!(code, 1);
}

#[test]
fn test_dial_value_out_of_range_is_refused() {
    let home = home();
    let (_, _, code) = run_cli(home.path(), &["dial", "set", "11"]);
    assert_ne!(code, 0);
}

#[test]
fn test_today_json_snapshot() {
    let home = home();
    let (stdout, _, code) = run_cli(home.path(), &["today", "--json"]);
    assert_eq!(code, 0);
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).expect("json");
    assert_eq!(snapshot["progress_percent"], 0);
    assert_eq!(snapshot["address"], "#/home");
    assert_eq!(snapshot["screen"]["card"]["kind"], "needs_focus");
}

#[test]
fn test_status_and_recompute() {
    let home = home();
    let (stdout, _, code) = run_cli(home.path(), &["status"]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("todayISO: "));
    assert!(stdout.contains("challenge loaded: false"));

    let (stdout, _, code) = run_cli(home.path(), &["recompute"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "emaProgress: 0.0");
}

#[test]
fn test_reset_clears_plan() {
    let home = home();
    plan_every_day(home.path());
    let (_, _, code) = run_cli(home.path(), &["reset"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(home.path(), &["plan", "show", "--json"]);
    let rows: serde_json::Value = serde_json::from_str(&stdout).expect("json");
    assert!(rows
        .as_array()
        .expect("array")
        .iter()
        .all(|row| row["valid"] == false));
}
