// SPDX-License-Identifier: MIT
// Copyright (c) 2026 trk contributors

//! trk-core: Shared library for the trk issue tracker
//!
//! This crate provides the data model, the SQLite-backed issue store
//! with optimistic concurrency control, the append-only timeline, the
//! bulk CSV import pipeline, and the reporting aggregates used by the
//! trk CLI.

pub mod db;
pub mod error;
pub mod import;
pub mod issue;
pub mod report;
pub mod store;
pub mod timeline;

pub use db::Database;
pub use error::{Error, Result};
pub use import::{import_csv, ImportResult, RowError};
pub use issue::{
    Comment, EventType, Issue, IssueFilter, IssuePatch, IssueSort, Label, NewIssue, Status,
    TimelineEvent, User,
};
pub use report::AssigneeStats;
pub use store::IssueStore;
