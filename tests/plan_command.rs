//! Integration tests for `staticprep plan` — the read-only plan view.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn staticprep() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("staticprep"))
}

#[test]
fn test_plan_lists_all_steps_in_order() {
    let dir = TempDir::new().expect("tempdir");
    let output = staticprep()
        .current_dir(dir.path())
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("create static root staticfiles"))
        .stdout(predicate::str::contains("collect static assets"))
        .stdout(predicate::str::contains("apply database migrations"));

    let stdout = String::from_utf8_lossy(&output.get_output().stdout).into_owned();
    let create = stdout.find("create static root").expect("create step");
    let collect = stdout.find("collect static assets").expect("collect step");
    assert!(create < collect, "directory step must come first:\n{stdout}");
}

#[test]
fn test_plan_marks_migrate_disabled_by_default() {
    let dir = TempDir::new().expect("tempdir");
    staticprep()
        .current_dir(dir.path())
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("disabled"));
}

#[test]
fn test_plan_shows_command_line_with_noinput() {
    let dir = TempDir::new().expect("tempdir");
    staticprep()
        .current_dir(dir.path())
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("python manage.py collectstatic --noinput"));
}

#[test]
fn test_plan_executes_nothing() {
    let dir = TempDir::new().expect("tempdir");
    staticprep()
        .current_dir(dir.path())
        .arg("plan")
        .assert()
        .success();

    assert!(
        !dir.path().join("staticfiles").exists(),
        "plan must not create the static root"
    );
}

#[test]
fn test_plan_json_structure() {
    let dir = TempDir::new().expect("tempdir");
    let output = staticprep()
        .current_dir(dir.path())
        .args(["plan", "--json"])
        .assert()
        .success();

    let plan: serde_json::Value =
        serde_json::from_slice(&output.get_output().stdout).expect("valid json");
    assert_eq!(plan["interpreter"], "python");
    let steps = plan["steps"].as_array().expect("steps array");
    assert_eq!(steps.len(), 3);
    assert_eq!(steps[0]["kind"]["type"], "ensure_dir");
    assert_eq!(steps[1]["kind"]["subcommand"], "collectstatic");
    assert_eq!(steps[2]["kind"]["subcommand"], "migrate");
    assert_eq!(steps[2]["enabled"], false);
}

#[test]
fn test_plan_json_with_migrate_enabled() {
    let dir = TempDir::new().expect("tempdir");
    let output = staticprep()
        .current_dir(dir.path())
        .args(["plan", "--with-migrate", "--json"])
        .assert()
        .success();

    let plan: serde_json::Value =
        serde_json::from_slice(&output.get_output().stdout).expect("valid json");
    assert_eq!(plan["steps"][2]["enabled"], true);
}

#[test]
fn test_plan_respects_flag_overrides() {
    let dir = TempDir::new().expect("tempdir");
    staticprep()
        .current_dir(dir.path())
        .args(["plan", "--static-dir", "public/static", "--interpreter", "python3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("public/static"))
        .stdout(predicate::str::contains("python3"));
}
