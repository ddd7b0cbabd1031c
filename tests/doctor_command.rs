//! Integration tests for `staticprep doctor` — preflight diagnostics.

#![allow(clippy::expect_used)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn staticprep() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("staticprep"))
}

/// Write an executable stub interpreter that answers `--version`.
fn stub_interpreter(dir: &Path) -> PathBuf {
    let path = dir.join("fake_python");
    std::fs::write(&path, "#!/bin/sh\necho \"Python 3.12.0\"\nexit 0\n").expect("write stub");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).expect("chmod");
    path
}

fn healthy_setup(dir: &Path) -> PathBuf {
    std::fs::write(dir.join("manage.py"), b"# stub\n").expect("write manage.py");
    stub_interpreter(dir)
}

#[test]
fn test_doctor_healthy_setup_exits_zero() {
    let dir = TempDir::new().expect("tempdir");
    let interpreter = healthy_setup(dir.path());

    staticprep()
        .current_dir(dir.path())
        .args(["doctor", "--interpreter", interpreter.to_str().expect("utf8")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Python 3.12.0"))
        .stdout(predicate::str::contains("manage.py"));
}

#[test]
fn test_doctor_reports_absent_static_root_as_informational() {
    let dir = TempDir::new().expect("tempdir");
    let interpreter = healthy_setup(dir.path());

    staticprep()
        .current_dir(dir.path())
        .args(["doctor", "--interpreter", interpreter.to_str().expect("utf8")])
        .assert()
        .success()
        .stdout(predicate::str::contains("will be created"));
}

#[test]
fn test_doctor_missing_interpreter_fails() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(dir.path().join("manage.py"), b"# stub\n").expect("write manage.py");

    staticprep()
        .current_dir(dir.path())
        .args(["doctor", "--interpreter", "staticprep-no-such-interpreter"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("preflight checks failed"));
}

#[test]
fn test_doctor_missing_manage_script_fails() {
    let dir = TempDir::new().expect("tempdir");
    let interpreter = stub_interpreter(dir.path());

    staticprep()
        .current_dir(dir.path())
        .args(["doctor", "--interpreter", interpreter.to_str().expect("utf8")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("manage.py not found"));
}

#[test]
fn test_doctor_blocked_static_root_fails() {
    let dir = TempDir::new().expect("tempdir");
    let interpreter = healthy_setup(dir.path());
    std::fs::write(dir.path().join("staticfiles"), b"in the way").expect("write blocker");

    staticprep()
        .current_dir(dir.path())
        .args(["doctor", "--interpreter", interpreter.to_str().expect("utf8")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("blocked by a non-directory entry"));
}

#[test]
fn test_doctor_json_structure() {
    let dir = TempDir::new().expect("tempdir");
    let interpreter = healthy_setup(dir.path());
    std::fs::create_dir(dir.path().join("staticfiles")).expect("mkdir");

    let output = staticprep()
        .current_dir(dir.path())
        .args([
            "doctor",
            "--json",
            "--interpreter",
            interpreter.to_str().expect("utf8"),
        ])
        .assert()
        .success();

    let checks: serde_json::Value =
        serde_json::from_slice(&output.get_output().stdout).expect("valid json");
    assert_eq!(checks["interpreter"]["available"], true);
    assert_eq!(checks["interpreter"]["version"], "Python 3.12.0");
    assert_eq!(checks["manage_script_found"], true);
    assert_eq!(checks["static_root"], "directory");
}

#[test]
fn test_doctor_makes_no_filesystem_changes() {
    let dir = TempDir::new().expect("tempdir");
    let interpreter = healthy_setup(dir.path());

    staticprep()
        .current_dir(dir.path())
        .args(["doctor", "--interpreter", interpreter.to_str().expect("utf8")])
        .assert()
        .success();

    assert!(!dir.path().join("staticfiles").exists());
}
