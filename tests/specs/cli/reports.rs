// SPDX-License-Identifier: MIT
// Copyright (c) 2026 trk contributors

//! Rust specs for `trk report`: status counts, resolution latency,
//! and assignee workload.

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

fn new_issue(temp: &TempDir, title: &str, extra: &[&str]) {
    let mut cmd = trk();
    cmd.arg("new").arg(title);
    for arg in extra {
        cmd.arg(arg);
    }
    cmd.current_dir(temp.path()).assert().success();
}

#[test]
fn status_report_includes_zero_counts() {
    let temp = init_temp();
    new_issue(&temp, "One", &[]);
    new_issue(&temp, "Two", &["-s", "in_progress"]);

    let output = trk()
        .arg("report")
        .arg("status")
        .arg("-o")
        .arg("json")
        .current_dir(temp.path())
        .output()
        .unwrap();
    let counts: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(counts["open"], 1);
    assert_eq!(counts["in_progress"], 1);
    assert_eq!(counts["closed"], 0);
}

#[test]
fn latency_report_is_empty_without_resolved_issues() {
    let temp = init_temp();
    new_issue(&temp, "Still open", &[]);

    trk().arg("report")
        .arg("latency")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No resolved issues"));
}

#[test]
fn latency_report_covers_closed_issues() {
    let temp = init_temp();
    new_issue(&temp, "Quick fix", &[]);
    trk().arg("edit")
        .arg("1")
        .arg("-s")
        .arg("closed")
        .current_dir(temp.path())
        .assert()
        .success();

    let output = trk()
        .arg("report")
        .arg("latency")
        .arg("-o")
        .arg("json")
        .current_dir(temp.path())
        .output()
        .unwrap();
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(doc["average_resolution_seconds"].is_i64());
}

#[test]
fn top_assignees_ranks_by_open_workload() {
    let temp = init_temp();
    for (name, email) in [("Alice", "alice@example.com"), ("Bob", "bob@example.com")] {
        trk().arg("user")
            .arg("add")
            .arg(name)
            .arg(email)
            .current_dir(temp.path())
            .assert()
            .success();
    }

    new_issue(&temp, "A1", &["-a", "1"]);
    new_issue(&temp, "A2", &["-a", "1"]);
    new_issue(&temp, "B1", &["-a", "2"]);
    new_issue(&temp, "Unowned", &[]);

    let output = trk()
        .arg("report")
        .arg("top-assignees")
        .arg("-o")
        .arg("json")
        .current_dir(temp.path())
        .output()
        .unwrap();
    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(stats.as_array().unwrap().len(), 2);
    assert_eq!(stats[0]["name"], "Alice");
    assert_eq!(stats[0]["total_assigned"], 2);
    assert_eq!(stats[1]["name"], "Bob");
}

#[test]
fn top_assignees_honors_the_count_flag() {
    let temp = init_temp();
    for (name, email) in [("Alice", "alice@example.com"), ("Bob", "bob@example.com")] {
        trk().arg("user")
            .arg("add")
            .arg(name)
            .arg(email)
            .current_dir(temp.path())
            .assert()
            .success();
    }
    new_issue(&temp, "A1", &["-a", "1"]);
    new_issue(&temp, "B1", &["-a", "2"]);

    let output = trk()
        .arg("report")
        .arg("top-assignees")
        .arg("-c")
        .arg("1")
        .arg("-o")
        .arg("json")
        .current_dir(temp.path())
        .output()
        .unwrap();
    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats.as_array().unwrap().len(), 1);
}
