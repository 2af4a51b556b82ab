// SPDX-License-Identifier: MIT
// Copyright (c) 2026 trk contributors

#![allow(clippy::unwrap_used)]

use super::*;

#[test]
fn not_initialized_hints_at_init() {
    assert!(Error::NotInitialized.to_string().contains("trk init"));
}

#[test]
fn already_initialized_names_the_path() {
    let err = Error::AlreadyInitialized("/tmp/x/.trk".to_string());
    assert!(err.to_string().contains("/tmp/x/.trk"));
}

#[test]
fn core_errors_pass_through_unwrapped() {
    let err = Error::from(trk_core::Error::IssueNotFound(12));
    assert_eq!(err.to_string(), trk_core::Error::IssueNotFound(12).to_string());
}

#[test]
fn io_errors_convert() {
    let err = Error::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
    assert!(matches!(err, Error::Io(_)));
}
