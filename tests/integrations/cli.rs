//! End-to-end tests that drive the `loginwatch` binary in dry-run mode.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn loginwatch() -> Command {
    let mut cmd = Command::cargo_bin("loginwatch").unwrap();
    cmd.env("RUST_LOG", "info")
        .env_remove("LOGINWATCH_DRY_RUN")
        .env_remove("LOGINWATCH_SNS__TOPIC_ARN");
    cmd
}

#[test]
fn test_dry_run_from_stdin() {
    loginwatch()
        .arg("--dry-run")
        .write_stdin(r#"{"Records": [{"message": "Failed login attempt by user bob"}]}"#)
        .assert()
        .success()
        .stdout(r#"{"statusCode":200,"body":"\"Execution completed\""}"#.to_string() + "\n")
        .stderr(predicate::str::contains("Alert sent to SNS"))
        .stderr(predicate::str::contains("Event Received"));
}

#[test]
fn test_dry_run_logs_one_confirmation_per_match() {
    let output = loginwatch()
        .arg("--dry-run")
        .write_stdin(
            r#"{"Records": [
                {"message": "Failed login attempt"},
                {"message": "ok"},
                {"message": null},
                {"message": "Failed login attempt again"}
            ]}"#,
        )
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("Alert sent to SNS").count(), 2, "stderr: {stderr}");
    assert_eq!(stderr.matches("Event Received").count(), 1, "stderr: {stderr}");
    assert_eq!(
        stderr.matches("[dry-run] would publish alert").count(),
        2,
        "stderr: {stderr}"
    );
}

#[test]
fn test_dry_run_from_event_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"Records": [{{"message": "ok"}}]}}
{{}}"#
    )
    .unwrap();

    loginwatch()
        .args(["--dry-run", "--event"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"statusCode\":200").count(2))
        .stderr(predicate::str::contains("Alert sent to SNS").not());
}

#[test]
fn test_malformed_event_exits_with_failure() {
    loginwatch()
        .arg("--dry-run")
        .write_stdin(r#"{"Records": "not a list"}"#)
        .assert()
        .failure()
        .stdout(predicate::str::contains("InputShapeError"));
}

#[test]
fn test_missing_config_file_exits_with_failure() {
    loginwatch()
        .args(["--dry-run", "--config", "/nonexistent/loginwatch.toml"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}
