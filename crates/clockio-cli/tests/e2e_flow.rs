//! End-to-end tests for the complete clock-in/clock-out flow.
//!
//! Drives the built binary: clock in/out -> hours/current/report -> status.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn clockio_binary() -> String {
    env!("CARGO_BIN_EXE_clockio").to_string()
}

/// Runs clockio with an isolated home and database.
fn clockio(temp: &Path, args: &[&str]) -> Output {
    Command::new(clockio_binary())
        .env("HOME", temp)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("XDG_DATA_HOME")
        .env_remove("CLOCKIO_USER")
        .env("CLOCKIO_DATABASE_PATH", temp.join("clockio.db"))
        .args(args)
        .output()
        .expect("failed to run clockio")
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "clockio should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn work_first_week_of_2022(temp: &Path) {
    for day in ["2022-01-04", "2022-01-06", "2022-01-07"] {
        let clock_in = format!("{day}T08:21:34Z");
        let clock_out = format!("{day}T11:21:34Z");
        stdout(&clockio(temp, &["--user", "test", "in", "--at", &clock_in]));
        stdout(&clockio(temp, &["--user", "test", "out", "--at", &clock_out]));
    }
}

#[test]
fn test_clock_in_prints_event() {
    let temp = TempDir::new().unwrap();
    let output = clockio(
        temp.path(),
        &["--user", "test", "in", "--at", "2022-01-04T08:21:34Z"],
    );
    assert_eq!(
        stdout(&output),
        "Clocked in as test at 2022-01-04T08:21:34Z\n"
    );
}

#[test]
fn test_hours_over_first_week() {
    let temp = TempDir::new().unwrap();
    work_first_week_of_2022(temp.path());

    let output = clockio(
        temp.path(),
        &[
            "--user",
            "test",
            "hours",
            "--as-of",
            "2022-01-07T12:00:00Z",
            "--json",
        ],
    );
    assert_eq!(
        stdout(&output).trim(),
        r#"{"today":3,"current_week":9,"current_month":9}"#
    );
}

#[test]
fn test_current_clock_measures_from_last_clock_in() {
    let temp = TempDir::new().unwrap();
    work_first_week_of_2022(temp.path());

    let output = clockio(
        temp.path(),
        &[
            "--user",
            "test",
            "current",
            "--as-of",
            "2022-01-07T12:00:00Z",
            "--json",
        ],
    );
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["elapsed_seconds"], 13_106);
    assert_eq!(value["clocked_in_at"], "2022-01-07T08:21:34Z");
}

#[test]
fn test_week_report_totals() {
    let temp = TempDir::new().unwrap();
    work_first_week_of_2022(temp.path());

    let output = clockio(
        temp.path(),
        &["--user", "test", "report", "--year", "2022", "--week", "1", "--json"],
    );
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["total"], 9);
    assert_eq!(value["days"].as_array().unwrap().len(), 7);
}

#[test]
fn test_anonymous_clock_in_is_rejected() {
    let temp = TempDir::new().unwrap();

    let output = clockio(temp.path(), &["in"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("authentication credentials were not provided"),
        "unexpected stderr: {stderr}"
    );

    let status = stdout(&clockio(temp.path(), &["status"]));
    assert!(status.contains("Clock-ins:  0"), "unexpected status: {status}");
}

#[test]
fn test_user_from_environment() {
    let temp = TempDir::new().unwrap();
    let output = Command::new(clockio_binary())
        .env("HOME", temp.path())
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("XDG_DATA_HOME")
        .env("CLOCKIO_USER", "sarit")
        .env("CLOCKIO_DATABASE_PATH", temp.path().join("clockio.db"))
        .arg("me")
        .output()
        .unwrap();
    assert_eq!(stdout(&output), "sarit\n");
}

#[test]
fn test_cli_user_overrides_config_file() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("clockio.toml");
    std::fs::write(&config_path, "user = \"from-config\"\n").unwrap();
    let config_arg = config_path.display().to_string();

    let output = clockio(temp.path(), &["--config", &config_arg, "me"]);
    assert_eq!(stdout(&output), "from-config\n");

    let output = clockio(
        temp.path(),
        &["--config", &config_arg, "--user", "from-flag", "me"],
    );
    assert_eq!(stdout(&output), "from-flag\n");
}
