//! CLI integration tests.

use std::io::Write;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn enrollrush() -> Command {
    let mut cmd = cargo_bin_cmd!("enrollrush");
    cmd.env_remove("ENROLLRUSH_ACCESS_TOKEN");
    cmd
}

fn temp_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

#[test]
fn help_lists_commands() {
    enrollrush()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("enrollrush"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("history"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn version_prints_name() {
    enrollrush()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("enrollrush"));
}

#[test]
fn run_requires_ids_or_all() {
    enrollrush()
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--eid"));
}

#[test]
fn run_rejects_eid_with_all() {
    enrollrush()
        .args(["run", "--eid", "E1", "--all"])
        .assert()
        .failure();
}

#[test]
fn run_without_token_fails_before_any_request() {
    let dir = tempfile::tempdir().expect("temp dir");
    enrollrush()
        .current_dir(dir.path())
        .args(["run", "--eid", "E1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ENROLLRUSH_ACCESS_TOKEN"));
}

#[test]
fn check_config_accepts_valid_file() {
    let file = temp_config("[submit]\nfailure_limit = 5\n");
    enrollrush()
        .args(["check", "config", "--config"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file is valid"))
        .stdout(predicate::str::contains("not configured"));
}

#[test]
fn check_config_reports_invalid_values() {
    let file = temp_config("[submit]\nmax_concurrency = 0\n");
    enrollrush()
        .args(["check", "config", "--config"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_concurrency"));
}

#[test]
fn check_config_json_mode_emits_json_lines() {
    let file = temp_config("");
    enrollrush()
        .args(["--json", "check", "config", "--config"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\":\"success\""));
}

#[test]
fn run_flag_overrides_are_validated_after_the_file() {
    let file = temp_config("[submit]\nfailure_limit = 0\n");

    enrollrush()
        .args(["run", "--eid", "E1", "--config"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failure_limit"));

    // With the override the config is valid and the run stops at the token.
    enrollrush()
        .args(["run", "--eid", "E1", "--failure-limit", "5", "--config"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("ENROLLRUSH_ACCESS_TOKEN"))
        .stderr(predicate::str::contains("failure_limit").not());
}
