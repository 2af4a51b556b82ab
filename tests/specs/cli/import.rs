// SPDX-License-Identifier: MIT
// Copyright (c) 2026 trk contributors

//! Rust specs for the `trk import` command: per-row failure
//! accounting over CSV input.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn trk() -> Command {
    cargo_bin_cmd!("trk")
}

fn init_temp() -> TempDir {
    let temp = TempDir::new().unwrap();
    trk().arg("init")
        .current_dir(temp.path())
        .assert()
        .success();
    temp
}

fn write_csv(temp: &TempDir, name: &str, content: &str) -> String {
    let path = temp.path().join(name);
    std::fs::write(&path, content).unwrap();
    path.display().to_string()
}

#[test]
fn imports_every_valid_row() {
    let temp = init_temp();
    let file = write_csv(
        &temp,
        "backlog.csv",
        "title,description,status\n\
         Fix login,Broken on Safari,open\n\
         Update docs,,in_progress\n",
    );

    trk().arg("import")
        .arg(&file)
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 issue(s), 0 failed"));

    trk().arg("list")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Fix login"))
        .stdout(predicate::str::contains("Update docs"));
}

#[test]
fn bad_rows_are_reported_but_do_not_abort() {
    let temp = init_temp();
    let file = write_csv(
        &temp,
        "mixed.csv",
        "title,status\n\
         X,\n\
         ,open\n\
         Y,bogus\n",
    );

    trk().arg("import")
        .arg(&file)
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 issue(s), 2 failed"))
        .stdout(predicate::str::contains("row 1:"))
        .stdout(predicate::str::contains("row 2:"));

    // Only the good row landed
    trk().arg("list")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("X"))
        .stdout(predicate::str::contains("Y").not());
}

#[test]
fn json_output_carries_the_error_details() {
    let temp = init_temp();
    let file = write_csv(&temp, "bad.csv", "title,status\n,open\n");

    let output = trk()
        .arg("import")
        .arg(&file)
        .arg("-o")
        .arg("json")
        .current_dir(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["created"], 0);
    assert_eq!(result["failed"], 1);
    assert_eq!(result["errors"][0]["row_index"], 0);
    assert!(result["errors"][0]["reason"]
        .as_str()
        .unwrap()
        .contains("title"));
}

#[test]
fn missing_file_is_an_error() {
    let temp = init_temp();
    trk().arg("import")
        .arg("nope.csv")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.csv"));
}

#[test]
fn missing_title_column_aborts_the_import() {
    let temp = init_temp();
    let file = write_csv(&temp, "headless.csv", "status\nopen\n");

    trk().arg("import")
        .arg(&file)
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("title"));
}

#[test]
fn assignees_are_resolved_against_registered_users() {
    let temp = init_temp();
    trk().arg("user")
        .arg("add")
        .arg("Alice")
        .arg("alice@example.com")
        .current_dir(temp.path())
        .assert()
        .success();

    let file = write_csv(
        &temp,
        "assigned.csv",
        "title,assignee_id\n\
         Owned,1\n\
         Orphaned,42\n",
    );

    trk().arg("import")
        .arg(&file)
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 issue(s), 1 failed"))
        .stdout(predicate::str::contains("user not found"));
}
