// SPDX-License-Identifier: MIT
// Copyright (c) 2026 trk contributors

//! The authoritative issue store.
//!
//! [`IssueStore`] owns issue and comment lifecycles. Every accepted
//! mutation appends timeline events describing the change; the version
//! check-and-bump for updates runs inside a single transaction so a
//! stale writer can never clobber a newer write.

use chrono::Utc;

use crate::db::{self, Database};
use crate::error::{Error, Result};
use crate::issue::{
    validate_comment_body, validate_title, Comment, EventType, Issue, IssueFilter, IssuePatch,
    Label, NewIssue, Status, TimelineEvent, User,
};

/// SQLite-backed issue store with optimistic concurrency control.
pub struct IssueStore {
    db: Database,
}

impl IssueStore {
    /// Wraps an open database.
    pub fn new(db: Database) -> Self {
        IssueStore { db }
    }

    /// Read-only access to the underlying database (used by reports).
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Create a new issue. Fails if the title is invalid or a
    /// referenced assignee or label does not exist.
    pub fn create(&mut self, req: NewIssue) -> Result<Issue> {
        validate_title(&req.title)?;

        let status = req.status.unwrap_or(Status::Open);
        let mut issue = Issue {
            id: 0,
            title: req.title,
            description: req.description,
            status,
            assignee_id: req.assignee_id,
            version: 1,
            created_at: Utc::now(),
            resolved_at: None,
        };

        let tx = self.db.conn.transaction()?;
        if let Some(uid) = issue.assignee_id {
            if !db::user_exists(&tx, uid)? {
                return Err(Error::UserNotFound(uid));
            }
        }
        for label_id in &req.labels {
            db::fetch_label(&tx, *label_id)?;
        }

        issue.id = db::insert_issue(&tx, &issue)?;
        if !req.labels.is_empty() {
            db::replace_issue_labels(&tx, issue.id, &req.labels)?;
        }
        tx.commit()?;

        self.append_event(
            TimelineEvent::new(issue.id, EventType::Created, "issue created")
                .with_values(None, Some(status.as_str().to_string())),
        );

        Ok(issue)
    }

    /// Fetch an issue by id.
    pub fn get(&self, id: i64) -> Result<Issue> {
        db::fetch_issue(&self.db.conn, id)
    }

    /// Apply a patch to an issue under optimistic concurrency control.
    ///
    /// Accepted iff `expected_version` equals the stored version; the
    /// compare and the version bump are one atomic statement inside
    /// one transaction, so no other write can interleave. A rejected
    /// update leaves the issue untouched and returns
    /// [`Error::VersionConflict`] carrying the current snapshot.
    ///
    /// An accepted update increments the version exactly once and
    /// emits one timeline event per field that actually changed, in a
    /// fixed order (title, description, status, assignee, labels) for
    /// deterministic replay.
    pub fn update(&mut self, id: i64, patch: IssuePatch, expected_version: i64) -> Result<Issue> {
        if patch.is_empty() {
            return Err(Error::Validation {
                field: "patch",
                reason: "no fields to update".to_string(),
            });
        }
        if let Some(title) = &patch.title {
            validate_title(title)?;
        }

        let tx = self.db.conn.transaction()?;

        let before = db::fetch_issue(&tx, id)?;
        if before.version != expected_version {
            let current = before.version;
            return Err(Error::VersionConflict {
                expected: expected_version,
                current,
                issue: Box::new(before),
            });
        }

        if let Some(Some(uid)) = patch.assignee_id {
            if !db::user_exists(&tx, uid)? {
                return Err(Error::UserNotFound(uid));
            }
        }
        if let Some(label_ids) = &patch.labels {
            for label_id in label_ids {
                db::fetch_label(&tx, *label_id)?;
            }
        }
        let before_labels = db::fetch_issue_labels(&tx, id)?;

        let mut after = before.clone();
        if let Some(title) = &patch.title {
            after.title = title.clone();
        }
        if let Some(description) = &patch.description {
            after.description = Some(description.clone());
        }
        if let Some(status) = patch.status {
            after.status = status;
            // First transition into closed stamps the resolution time
            if status.is_closed() && !before.status.is_closed() && after.resolved_at.is_none() {
                after.resolved_at = Some(Utc::now());
            }
        }
        if let Some(assignee) = patch.assignee_id {
            after.assignee_id = assignee;
        }

        if !db::update_issue_cas(&tx, &after, expected_version)? {
            let current = db::fetch_issue(&tx, id)?;
            let version = current.version;
            return Err(Error::VersionConflict {
                expected: expected_version,
                current: version,
                issue: Box::new(current),
            });
        }

        let mut after_labels = before_labels.clone();
        if let Some(label_ids) = &patch.labels {
            db::replace_issue_labels(&tx, id, label_ids)?;
            after_labels = db::fetch_issue_labels(&tx, id)?;
        }

        tx.commit()?;
        after.version = expected_version + 1;

        self.emit_update_events(&before, &after, &before_labels, &after_labels);

        Ok(after)
    }

    /// Add a comment to an issue. Comments are additive and do not
    /// take part in version checking.
    pub fn add_comment(&mut self, issue_id: i64, author_id: i64, body: &str) -> Result<Comment> {
        validate_comment_body(body)?;
        if !db::issue_exists(&self.db.conn, issue_id)? {
            return Err(Error::IssueNotFound(issue_id));
        }
        if !db::user_exists(&self.db.conn, author_id)? {
            return Err(Error::UserNotFound(author_id));
        }

        let mut comment = Comment {
            id: 0,
            issue_id,
            author_id,
            body: body.to_string(),
            created_at: Utc::now(),
        };
        comment.id = db::insert_comment(&self.db.conn, &comment)?;

        self.append_event(
            TimelineEvent::new(issue_id, EventType::CommentAdded, "comment added")
                .with_values(None, Some(comment.id.to_string())),
        );

        Ok(comment)
    }

    /// List issues matching the filter.
    pub fn list(&self, filter: &IssueFilter) -> Result<Vec<Issue>> {
        db::list_issues(&self.db.conn, filter)
    }

    /// The full event log of an issue, oldest first.
    pub fn timeline(&self, issue_id: i64) -> Result<Vec<TimelineEvent>> {
        if !db::issue_exists(&self.db.conn, issue_id)? {
            return Err(Error::IssueNotFound(issue_id));
        }
        db::fetch_events(&self.db.conn, issue_id)
    }

    /// Labels attached to an issue, ordered by name.
    pub fn labels_of(&self, issue_id: i64) -> Result<Vec<Label>> {
        if !db::issue_exists(&self.db.conn, issue_id)? {
            return Err(Error::IssueNotFound(issue_id));
        }
        db::fetch_issue_labels(&self.db.conn, issue_id)
    }

    /// Comments on an issue in insertion order.
    pub fn comments_of(&self, issue_id: i64) -> Result<Vec<Comment>> {
        if !db::issue_exists(&self.db.conn, issue_id)? {
            return Err(Error::IssueNotFound(issue_id));
        }
        db::fetch_comments(&self.db.conn, issue_id)
    }

    /// Create a label with a unique, non-empty name.
    pub fn create_label(&mut self, name: &str) -> Result<Label> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation {
                field: "name",
                reason: "must not be empty".to_string(),
            });
        }
        let id = db::insert_label(&self.db.conn, name)?;
        Ok(Label {
            id,
            name: name.to_string(),
        })
    }

    /// All labels, ordered by name.
    pub fn list_labels(&self) -> Result<Vec<Label>> {
        db::fetch_all_labels(&self.db.conn)
    }

    /// Delete a label, removing it from every issue that carries it so
    /// no dangling reference survives. Each affected issue gets a
    /// label_changed event; versions are not bumped (the label set is
    /// shared state, not a caller-submitted issue update).
    pub fn delete_label(&mut self, label_id: i64) -> Result<()> {
        let label = db::fetch_label(&self.db.conn, label_id)?;

        let tx = self.db.conn.transaction()?;
        let carriers = db::delete_label(&tx, label_id)?;
        tx.commit()?;

        for issue_id in carriers {
            self.append_event(
                TimelineEvent::new(
                    issue_id,
                    EventType::LabelChanged,
                    format!("label '{}' removed", label.name),
                )
                .with_values(Some(label.id.to_string()), None),
            );
        }
        Ok(())
    }

    /// Register a user.
    pub fn create_user(&mut self, name: &str, email: &str) -> Result<User> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() {
            return Err(Error::Validation {
                field: "name",
                reason: "must not be empty".to_string(),
            });
        }
        if email.is_empty() || !email.contains('@') {
            return Err(Error::Validation {
                field: "email",
                reason: "must be a valid email address".to_string(),
            });
        }
        let id = db::insert_user(&self.db.conn, name, email)?;
        Ok(User {
            id,
            name: name.to_string(),
            email: email.to_string(),
        })
    }

    /// Fetch a user by id.
    pub fn get_user(&self, id: i64) -> Result<User> {
        db::fetch_user(&self.db.conn, id)
    }

    /// All users in insertion order.
    pub fn list_users(&self) -> Result<Vec<User>> {
        db::fetch_all_users(&self.db.conn)
    }

    /// Emit the events describing an accepted update. Fixed field
    /// order; status_changed always precedes assignee_changed.
    fn emit_update_events(
        &self,
        before: &Issue,
        after: &Issue,
        before_labels: &[Label],
        after_labels: &[Label],
    ) {
        if before.title != after.title {
            self.append_event(
                TimelineEvent::new(
                    after.id,
                    EventType::Edited,
                    format!("title: '{}' -> '{}'", before.title, after.title),
                )
                .with_values(Some(before.title.clone()), Some(after.title.clone())),
            );
        }
        if before.description != after.description {
            self.append_event(TimelineEvent::new(
                after.id,
                EventType::Edited,
                "description updated",
            ));
        }
        if before.status != after.status {
            self.append_event(
                TimelineEvent::new(
                    after.id,
                    EventType::StatusChanged,
                    format!("status: {} -> {}", before.status, after.status),
                )
                .with_values(
                    Some(before.status.as_str().to_string()),
                    Some(after.status.as_str().to_string()),
                ),
            );
        }
        if before.assignee_id != after.assignee_id {
            let fmt = |v: Option<i64>| v.map_or("none".to_string(), |id| id.to_string());
            self.append_event(
                TimelineEvent::new(
                    after.id,
                    EventType::AssigneeChanged,
                    format!(
                        "assignee: {} -> {}",
                        fmt(before.assignee_id),
                        fmt(after.assignee_id)
                    ),
                )
                .with_values(
                    before.assignee_id.map(|id| id.to_string()),
                    after.assignee_id.map(|id| id.to_string()),
                ),
            );
        }
        if label_ids(before_labels) != label_ids(after_labels) {
            let names: Vec<&str> = after_labels.iter().map(|l| l.name.as_str()).collect();
            let details = if names.is_empty() {
                "labels: (none)".to_string()
            } else {
                format!("labels: {}", names.join(", "))
            };
            self.append_event(
                TimelineEvent::new(after.id, EventType::LabelChanged, details).with_values(
                    Some(join_ids(before_labels)),
                    Some(join_ids(after_labels)),
                ),
            );
        }
    }

    /// Best-effort timeline append. A failure here degrades the audit
    /// trail but never rolls back the mutation that produced it.
    fn append_event(&self, event: TimelineEvent) {
        if let Err(e) = db::insert_event(&self.db.conn, &event) {
            tracing::warn!(
                issue_id = event.issue_id,
                event_type = event.event_type.as_str(),
                error = %e,
                "failed to append timeline event"
            );
        }
    }
}

fn label_ids(labels: &[Label]) -> Vec<i64> {
    let mut ids: Vec<i64> = labels.iter().map(|l| l.id).collect();
    ids.sort_unstable();
    ids
}

fn join_ids(labels: &[Label]) -> String {
    label_ids(labels)
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
