// SPDX-License-Identifier: MIT
// Copyright (c) 2026 trk contributors

//! Error types for trk-core operations.

use thiserror::Error;

use crate::issue::Issue;

/// All possible errors that can occur in trk-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("issue not found: {0}")]
    IssueNotFound(i64),

    #[error("label not found: {0}")]
    LabelNotFound(i64),

    #[error("user not found: {0}")]
    UserNotFound(i64),

    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("version conflict: expected version {expected} but issue is at version {current}\n  hint: refetch the issue and retry with its current version")]
    VersionConflict {
        expected: i64,
        current: i64,
        /// Snapshot of the stored issue at rejection time, so the
        /// caller can reconcile without a second fetch.
        issue: Box<Issue>,
    },

    #[error("invalid status: '{0}'\n  hint: valid statuses are: open, in_progress, closed")]
    InvalidStatus(String),

    #[error("invalid event type: '{0}'")]
    InvalidEventType(String),

    #[error("label name already exists: '{0}'")]
    DuplicateLabel(String),

    #[error("email already registered: '{0}'")]
    DuplicateEmail(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

/// A specialized Result type for trk-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
