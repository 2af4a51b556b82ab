// SPDX-License-Identifier: MIT
// Copyright (c) 2026 trk contributors

//! Rust specs for the issue lifecycle: init, new, edit under
//! optimistic locking, comments, and the timeline.

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

/// Helper to create an initialized temp directory.
fn init_temp() -> TempDir {
    let temp = TempDir::new().unwrap();
    trk().arg("init")
        .current_dir(temp.path())
        .assert()
        .success();
    temp
}

fn create_issue(temp: &TempDir, title: &str) -> i64 {
    let output = trk()
        .arg("new")
        .arg(title)
        .arg("-o")
        .arg("json")
        .current_dir(temp.path())
        .output()
        .unwrap();
    let issue: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    issue["id"].as_i64().unwrap()
}

// =============================================================================
// Init
// =============================================================================

#[test]
fn init_creates_tracker_and_refuses_to_run_twice() {
    let temp = TempDir::new().unwrap();
    trk().arg("init")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized"));

    trk().arg("init")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn commands_before_init_hint_at_init() {
    let temp = TempDir::new().unwrap();
    trk().arg("list")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("trk init"));
}

#[test]
fn commands_work_from_a_subdirectory() {
    let temp = init_temp();
    let sub = temp.path().join("src/deep");
    std::fs::create_dir_all(&sub).unwrap();

    trk().arg("new")
        .arg("From below")
        .current_dir(&sub)
        .assert()
        .success();
    trk().arg("list")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("From below"));
}

// =============================================================================
// Create and show
// =============================================================================

#[test]
fn new_issue_starts_open_at_version_one() {
    let temp = init_temp();
    let id = create_issue(&temp, "Fix login");

    trk().arg("show")
        .arg(id.to_string())
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: open"))
        .stdout(predicate::str::contains("Version: 1"));
}

#[test]
fn empty_title_is_rejected() {
    let temp = init_temp();
    trk().arg("new")
        .arg("   ")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("title"));
}

#[test]
fn show_unknown_issue_fails() {
    let temp = init_temp();
    trk().arg("show")
        .arg("999")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

// =============================================================================
// Edit under optimistic locking
// =============================================================================

#[test]
fn accepted_edit_bumps_the_version() {
    let temp = init_temp();
    let id = create_issue(&temp, "Fix login");

    trk().arg("edit")
        .arg(id.to_string())
        .arg("-s")
        .arg("in_progress")
        .arg("--version")
        .arg("1")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("v2"));
}

#[test]
fn stale_edit_is_rejected_and_changes_nothing() {
    let temp = init_temp();
    let id = create_issue(&temp, "Fix login");

    trk().arg("edit")
        .arg(id.to_string())
        .arg("--title")
        .arg("Renamed")
        .arg("--version")
        .arg("1")
        .current_dir(temp.path())
        .assert()
        .success();

    // Same expected version again: another writer got there first
    trk().arg("edit")
        .arg(id.to_string())
        .arg("--title")
        .arg("Stale")
        .arg("--version")
        .arg("1")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected version 1"));

    trk().arg("show")
        .arg(id.to_string())
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Renamed"))
        .stdout(predicate::str::contains("Version: 2"));
}

#[test]
fn edit_without_flags_shows_help() {
    let temp = init_temp();
    let id = create_issue(&temp, "Fix login");

    trk().arg("edit")
        .arg(id.to_string())
        .current_dir(temp.path())
        .assert()
        .failure();
}

// =============================================================================
// Comments and timeline
// =============================================================================

#[test]
fn comment_does_not_bump_the_version() {
    let temp = init_temp();
    let id = create_issue(&temp, "Fix login");
    trk().arg("user")
        .arg("add")
        .arg("Alice")
        .arg("alice@example.com")
        .current_dir(temp.path())
        .assert()
        .success();

    trk().arg("comment")
        .arg(id.to_string())
        .arg("looking into it")
        .arg("--author")
        .arg("1")
        .current_dir(temp.path())
        .assert()
        .success();

    trk().arg("show")
        .arg(id.to_string())
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Version: 1"))
        .stdout(predicate::str::contains("looking into it"));
}

#[test]
fn timeline_records_creation_and_status_changes_in_order() {
    let temp = init_temp();
    let id = create_issue(&temp, "Fix login");

    trk().arg("edit")
        .arg(id.to_string())
        .arg("-s")
        .arg("closed")
        .current_dir(temp.path())
        .assert()
        .success();

    let output = trk()
        .arg("log")
        .arg(id.to_string())
        .current_dir(temp.path())
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    let created = stdout.find("created").unwrap();
    let closed = stdout.find("status_changed").unwrap();
    assert!(created < closed);
}

#[test]
fn status_history_replays_the_transitions() {
    let temp = init_temp();
    let id = create_issue(&temp, "Fix login");

    for status in ["in_progress", "closed"] {
        trk().arg("edit")
            .arg(id.to_string())
            .arg("-s")
            .arg(status)
            .current_dir(temp.path())
            .assert()
            .success();
    }

    trk().arg("log")
        .arg(id.to_string())
        .arg("--status-history")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("open"))
        .stdout(predicate::str::contains("in_progress"))
        .stdout(predicate::str::contains("closed"));
}

// =============================================================================
// Labels
// =============================================================================

#[test]
fn deleting_a_label_detaches_it_from_issues() {
    let temp = init_temp();
    trk().arg("label")
        .arg("new")
        .arg("bug")
        .current_dir(temp.path())
        .assert()
        .success();

    let id = create_issue(&temp, "Tagged");
    trk().arg("edit")
        .arg(id.to_string())
        .arg("--labels")
        .arg("1")
        .current_dir(temp.path())
        .assert()
        .success();

    trk().arg("label")
        .arg("delete")
        .arg("1")
        .current_dir(temp.path())
        .assert()
        .success();

    trk().arg("show")
        .arg(id.to_string())
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Labels:").not());
}

#[test]
fn duplicate_label_names_are_rejected() {
    let temp = init_temp();
    trk().arg("label")
        .arg("new")
        .arg("bug")
        .current_dir(temp.path())
        .assert()
        .success();
    trk().arg("label")
        .arg("new")
        .arg("bug")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
