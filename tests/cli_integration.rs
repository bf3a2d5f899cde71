//! Runs the casebench binary end to end

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

mod common;

const MINIMAL_CONFIG: &str = "export:\n  file_prefix: test-cases\n";

fn casebench(config: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("casebench").unwrap();
    cmd.arg("--config").arg(config).arg("--instant");
    cmd
}

#[test]
fn test_tasks_lists_seeded_history() {
    let (_dir, config) = common::temp_config_file("progress:\n  step: 50\n");
    casebench(&config)
        .arg("tasks")
        .assert()
        .success()
        .stdout(predicate::str::contains("User Authentication Flow"))
        .stdout(predicate::str::contains("Profile Management"));
}

#[test]
fn test_tasks_json_is_parseable() {
    let (_dir, config) = common::temp_config_file(MINIMAL_CONFIG);
    let output = casebench(&config)
        .args(["tasks", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let tasks: Vec<casebench::Task> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(tasks.len(), 4);
    assert_eq!(tasks[0].case_count, 3);
}

#[test]
fn test_cases_unknown_task_fails() {
    let (_dir, config) = common::temp_config_file(MINIMAL_CONFIG);
    casebench(&config)
        .args(["cases", "--task", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("task not found: 99"));
}

#[test]
fn test_export_writes_csv() {
    let (_dir, config) = common::temp_config_file(MINIMAL_CONFIG);
    let out_dir = TempDir::new().unwrap();
    let target = out_dir.path().join("auth.csv");

    casebench(&config)
        .args(["export", "--task", "1", "--output"])
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 3 test cases"));

    let contents = std::fs::read_to_string(&target).unwrap();
    assert!(contents.starts_with("ID,Title,Scenario,Preconditions,Steps"));
}

#[test]
fn test_chat_change_request_reports_new_version() {
    let (_dir, config) = common::temp_config_file(MINIMAL_CONFIG);
    casebench(&config)
        .args(["chat", "--task", "1", "Add a lockout case"])
        .assert()
        .success()
        .stdout(predicate::str::contains("New version 1-v3"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let (_dir, config) = common::temp_config_file("progress:\n  step: 0\n");
    Command::cargo_bin("casebench")
        .unwrap()
        .arg("--config")
        .arg(&config)
        .arg("tasks")
        .assert()
        .failure()
        .stderr(predicate::str::contains("progress.step"));
}

#[test]
fn test_login_rejects_short_password() {
    let (_dir, config) = common::temp_config_file(MINIMAL_CONFIG);
    casebench(&config)
        .args(["login", "--email", "qa@example.com", "--password", "123"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Authentication error"));
}
