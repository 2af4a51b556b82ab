// SPDX-License-Identifier: MIT
// Copyright (c) 2026 trk contributors

//! Core issue types for the trk issue tracker.
//!
//! This module contains the fundamental data types: Issue, Status,
//! Comment, Label, User, EventType, and TimelineEvent, plus the request
//! shapes (NewIssue, IssuePatch, IssueFilter) accepted by the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Maximum accepted title length, in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Workflow status of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Not yet started. Initial state for new issues.
    Open,
    /// Currently being worked on.
    InProgress,
    /// Resolved. Terminal unless reopened.
    Closed,
}

impl Status {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Open => "open",
            Status::InProgress => "in_progress",
            Status::Closed => "closed",
        }
    }

    /// All statuses, in workflow order.
    pub fn all() -> [Status; 3] {
        [Status::Open, Status::InProgress, Status::Closed]
    }

    /// Returns true if this is the terminal state.
    pub fn is_closed(&self) -> bool {
        matches!(self, Status::Closed)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "open" => Ok(Status::Open),
            "in_progress" => Ok(Status::InProgress),
            "closed" => Ok(Status::Closed),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

/// The primary entity representing a tracked work item.
///
/// Labels and comments live in their own tables and are fetched
/// separately; see [`crate::store::IssueStore::labels_of`] and
/// [`crate::store::IssueStore::comments_of`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Database-assigned identifier. Immutable once assigned.
    pub id: i64,
    /// Short description of the work.
    pub title: String,
    /// Longer description providing context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Current workflow state.
    pub status: Status,
    /// User this issue is assigned to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<i64>,
    /// Optimistic-lock counter. Starts at 1, incremented exactly once
    /// per accepted update.
    pub version: i64,
    /// When the issue was created.
    pub created_at: DateTime<Utc>,
    /// When the issue first transitioned to closed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

/// A comment attached to an issue. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Database-assigned identifier.
    pub id: i64,
    /// The issue this comment belongs to.
    pub issue_id: i64,
    /// The user who wrote the comment.
    pub author_id: i64,
    /// The comment text.
    pub body: String,
    /// When the comment was created.
    pub created_at: DateTime<Utc>,
}

/// A shared label. Issues hold weak references to labels by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    /// Database-assigned identifier.
    pub id: i64,
    /// Unique, non-empty label name.
    pub name: String,
}

/// A user that issues can be assigned to and comments attributed to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Database-assigned identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Unique email address.
    pub email: String,
}

/// Types of lifecycle changes recorded in the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Issue was created.
    Created,
    /// Title or description was modified.
    Edited,
    /// Workflow status changed.
    StatusChanged,
    /// A comment was added.
    CommentAdded,
    /// Assignee was set, changed, or cleared.
    AssigneeChanged,
    /// The label set was replaced.
    LabelChanged,
}

impl EventType {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Created => "created",
            EventType::Edited => "edited",
            EventType::StatusChanged => "status_changed",
            EventType::CommentAdded => "comment_added",
            EventType::AssigneeChanged => "assignee_changed",
            EventType::LabelChanged => "label_changed",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "created" => Ok(EventType::Created),
            "edited" => Ok(EventType::Edited),
            "status_changed" => Ok(EventType::StatusChanged),
            "comment_added" => Ok(EventType::CommentAdded),
            "assignee_changed" => Ok(EventType::AssigneeChanged),
            "label_changed" => Ok(EventType::LabelChanged),
            _ => Err(Error::InvalidEventType(s.to_string())),
        }
    }
}

/// An append-only audit record of a change to an issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Database-assigned identifier.
    pub id: i64,
    /// The issue this event belongs to.
    pub issue_id: i64,
    /// What type of change occurred.
    pub event_type: EventType,
    /// Previous value (for status, assignee, and field edits).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_value: Option<String>,
    /// New value (for status, assignee, field edits, and label sets).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_value: Option<String>,
    /// Human-readable summary, e.g. "status: open -> in_progress".
    pub details: String,
    /// When the event occurred.
    pub created_at: DateTime<Utc>,
}

impl TimelineEvent {
    /// Creates a new event with the current timestamp.
    pub fn new(issue_id: i64, event_type: EventType, details: impl Into<String>) -> Self {
        TimelineEvent {
            id: 0, // Set by the database on insert
            issue_id,
            event_type,
            old_value: None,
            new_value: None,
            details: details.into(),
            created_at: Utc::now(),
        }
    }

    /// Sets the old and new values for this event (builder pattern).
    pub fn with_values(mut self, old: Option<String>, new: Option<String>) -> Self {
        self.old_value = old;
        self.new_value = new;
        self
    }
}

/// Request shape for creating an issue.
#[derive(Debug, Clone, Default)]
pub struct NewIssue {
    /// Required, non-empty, at most [`MAX_TITLE_LEN`] characters.
    pub title: String,
    pub description: Option<String>,
    /// Defaults to [`Status::Open`] when absent.
    pub status: Option<Status>,
    /// Must reference an existing user when present.
    pub assignee_id: Option<i64>,
    /// Label ids to attach at creation. Each must exist.
    pub labels: Vec<i64>,
}

impl NewIssue {
    /// Creates a request with only the title set.
    pub fn titled(title: impl Into<String>) -> Self {
        NewIssue {
            title: title.into(),
            ..NewIssue::default()
        }
    }
}

/// The closed set of mutations an update may apply.
///
/// Every set field is applied and audited; unset fields are left
/// untouched. An entirely empty patch is rejected.
#[derive(Debug, Clone, Default)]
pub struct IssuePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
    /// `Some(Some(id))` assigns, `Some(None)` clears, `None` leaves as-is.
    pub assignee_id: Option<Option<i64>>,
    /// Replaces the issue's full label set when present.
    pub labels: Option<Vec<i64>>,
}

impl IssuePatch {
    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.assignee_id.is_none()
            && self.labels.is_none()
    }
}

/// Sort order for issue listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IssueSort {
    /// Insertion order (id ascending). The default.
    #[default]
    InsertionOrder,
    /// Most recently created first.
    NewestFirst,
}

/// Filter and paging options for issue listings.
#[derive(Debug, Clone, Default)]
pub struct IssueFilter {
    pub status: Option<Status>,
    pub assignee_id: Option<i64>,
    pub label_id: Option<i64>,
    pub sort: IssueSort,
    /// Maximum number of issues to return. No limit when absent.
    pub limit: Option<usize>,
    /// Number of issues to skip.
    pub offset: usize,
}

/// Validates an issue title: non-empty after trimming, bounded length.
pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::Validation {
            field: "title",
            reason: "must not be empty".to_string(),
        });
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(Error::Validation {
            field: "title",
            reason: format!("must be at most {MAX_TITLE_LEN} characters"),
        });
    }
    Ok(())
}

/// Validates a comment body: non-empty after trimming.
pub fn validate_comment_body(body: &str) -> Result<()> {
    if body.trim().is_empty() {
        return Err(Error::Validation {
            field: "body",
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;
