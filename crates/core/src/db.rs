// SPDX-License-Identifier: MIT
// Copyright (c) 2026 trk contributors

//! SQLite-backed storage for the issue tracker.
//!
//! [`Database`] owns the connection; the row-level operations are free
//! functions over [`Connection`] so that [`crate::store::IssueStore`]
//! can run them inside a single transaction where atomicity matters
//! (the version check-and-bump in particular).

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::error::{Error, Result};
use crate::issue::{Comment, Issue, IssueFilter, IssueSort, Label, TimelineEvent, User};

/// SQL schema for the issue tracker database.
pub const SCHEMA: &str = r#"
-- Users that issues are assigned to and comments attributed to
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE
);

-- Core issue table; version drives optimistic locking
CREATE TABLE IF NOT EXISTS issues (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    status TEXT NOT NULL DEFAULT 'open',
    assignee_id INTEGER REFERENCES users(id),
    version INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL,
    resolved_at TEXT
);

-- Comments, immutable once created
CREATE TABLE IF NOT EXISTS comments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    issue_id INTEGER NOT NULL REFERENCES issues(id),
    author_id INTEGER NOT NULL REFERENCES users(id),
    body TEXT NOT NULL,
    created_at TEXT NOT NULL
);

-- Shared label set
CREATE TABLE IF NOT EXISTS labels (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

-- Issue <-> label references
CREATE TABLE IF NOT EXISTS issue_labels (
    issue_id INTEGER NOT NULL REFERENCES issues(id),
    label_id INTEGER NOT NULL REFERENCES labels(id),
    PRIMARY KEY (issue_id, label_id)
);

-- Timeline event log (append-only audit trail)
CREATE TABLE IF NOT EXISTS events (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    issue_id INTEGER NOT NULL REFERENCES issues(id),
    event_type TEXT NOT NULL,
    old_value TEXT,
    new_value TEXT,
    details TEXT NOT NULL,
    created_at TEXT NOT NULL
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_issues_status ON issues(status);
CREATE INDEX IF NOT EXISTS idx_issues_assignee ON issues(assignee_id);
CREATE INDEX IF NOT EXISTS idx_comments_issue ON comments(issue_id);
CREATE INDEX IF NOT EXISTS idx_issue_labels_label ON issue_labels(label_id);
CREATE INDEX IF NOT EXISTS idx_events_issue ON events(issue_id);
"#;

/// Parse a string value from the database, returning a rusqlite error on parse failure.
fn parse_db<T: std::str::FromStr>(
    value: &str,
    column: &str,
) -> std::result::Result<T, rusqlite::Error> {
    value.parse().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(Error::CorruptedData(format!(
                "invalid value '{value}' in column '{column}'"
            ))),
        )
    })
}

/// Parse an RFC3339 timestamp from the database.
fn parse_timestamp(
    value: &str,
    column: &str,
) -> std::result::Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(Error::CorruptedData(format!(
                    "invalid timestamp '{value}' in column '{column}'"
                ))),
            )
        })
}

/// Parse an optional RFC3339 timestamp from the database.
fn parse_timestamp_opt(
    value: Option<String>,
    column: &str,
) -> std::result::Result<Option<DateTime<Utc>>, rusqlite::Error> {
    match value {
        None => Ok(None),
        Some(s) => parse_timestamp(&s, column).map(Some),
    }
}

/// SQLite database connection for the issue tracker.
pub struct Database {
    /// The underlying SQLite connection.
    pub conn: Connection,
}

impl Database {
    /// Open a database connection at the given path, creating the
    /// schema if needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        // Foreign keys plus WAL mode for concurrent readers
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;

        conn.execute_batch(SCHEMA)?;
        Ok(Database { conn })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Database { conn })
    }
}

fn issue_from_row(row: &rusqlite::Row<'_>) -> std::result::Result<Issue, rusqlite::Error> {
    let status_str: String = row.get(3)?;
    let created_str: String = row.get(6)?;
    let resolved_str: Option<String> = row.get(7)?;

    Ok(Issue {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        status: parse_db(&status_str, "status")?,
        assignee_id: row.get(4)?,
        version: row.get(5)?,
        created_at: parse_timestamp(&created_str, "created_at")?,
        resolved_at: parse_timestamp_opt(resolved_str, "resolved_at")?,
    })
}

const ISSUE_COLUMNS: &str =
    "id, title, description, status, assignee_id, version, created_at, resolved_at";

/// Insert an issue row, returning the assigned id.
pub(crate) fn insert_issue(conn: &Connection, issue: &Issue) -> Result<i64> {
    conn.execute(
        "INSERT INTO issues (title, description, status, assignee_id, version, created_at, resolved_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            issue.title,
            issue.description,
            issue.status.as_str(),
            issue.assignee_id,
            issue.version,
            issue.created_at.to_rfc3339(),
            issue.resolved_at.map(|t| t.to_rfc3339()),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Fetch an issue by id.
pub(crate) fn fetch_issue(conn: &Connection, id: i64) -> Result<Issue> {
    let issue = conn
        .query_row(
            &format!("SELECT {ISSUE_COLUMNS} FROM issues WHERE id = ?1"),
            params![id],
            issue_from_row,
        )
        .optional()?;

    issue.ok_or(Error::IssueNotFound(id))
}

/// Check whether an issue exists.
pub(crate) fn issue_exists(conn: &Connection, id: i64) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM issues WHERE id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Apply updated field values to an issue row with a compare-and-swap
/// on the version column. Returns false if the stored version no
/// longer matches `expected_version` (a concurrent writer won).
pub(crate) fn update_issue_cas(
    conn: &Connection,
    issue: &Issue,
    expected_version: i64,
) -> Result<bool> {
    let affected = conn.execute(
        "UPDATE issues
         SET title = ?1, description = ?2, status = ?3, assignee_id = ?4,
             resolved_at = ?5, version = version + 1
         WHERE id = ?6 AND version = ?7",
        params![
            issue.title,
            issue.description,
            issue.status.as_str(),
            issue.assignee_id,
            issue.resolved_at.map(|t| t.to_rfc3339()),
            issue.id,
            expected_version,
        ],
    )?;
    Ok(affected > 0)
}

/// List issues matching the given filter.
pub(crate) fn list_issues(conn: &Connection, filter: &IssueFilter) -> Result<Vec<Issue>> {
    let mut sql = format!(
        "SELECT DISTINCT i.id, i.title, i.description, i.status, i.assignee_id,
                i.version, i.created_at, i.resolved_at
         FROM issues i{}",
        if filter.label_id.is_some() {
            " JOIN issue_labels il ON i.id = il.issue_id"
        } else {
            ""
        }
    );

    let mut conditions = Vec::new();
    let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

    if let Some(s) = filter.status {
        conditions.push("i.status = ?");
        params_vec.push(Box::new(s.as_str().to_string()));
    }
    if let Some(a) = filter.assignee_id {
        conditions.push("i.assignee_id = ?");
        params_vec.push(Box::new(a));
    }
    if let Some(l) = filter.label_id {
        conditions.push("il.label_id = ?");
        params_vec.push(Box::new(l));
    }

    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }

    match filter.sort {
        IssueSort::InsertionOrder => sql.push_str(" ORDER BY i.id ASC"),
        IssueSort::NewestFirst => sql.push_str(" ORDER BY i.created_at DESC, i.id DESC"),
    }

    // SQLite requires LIMIT when OFFSET is used
    let limit = filter
        .limit
        .map(|l| i64::try_from(l).unwrap_or(i64::MAX))
        .unwrap_or(-1);
    sql.push_str(" LIMIT ? OFFSET ?");
    params_vec.push(Box::new(limit));
    params_vec.push(Box::new(i64::try_from(filter.offset).unwrap_or(i64::MAX)));

    let mut stmt = conn.prepare(&sql)?;
    let params_refs: Vec<&dyn rusqlite::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();

    let issues = stmt
        .query_map(params_refs.as_slice(), issue_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(issues)
}

/// Append a timeline event, returning its assigned id.
pub(crate) fn insert_event(conn: &Connection, event: &TimelineEvent) -> Result<i64> {
    conn.execute(
        "INSERT INTO events (issue_id, event_type, old_value, new_value, details, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            event.issue_id,
            event.event_type.as_str(),
            event.old_value,
            event.new_value,
            event.details,
            event.created_at.to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Fetch all events for an issue, oldest first. Insertion id breaks
/// timestamp ties so replay order is stable.
pub(crate) fn fetch_events(conn: &Connection, issue_id: i64) -> Result<Vec<TimelineEvent>> {
    let mut stmt = conn.prepare(
        "SELECT id, issue_id, event_type, old_value, new_value, details, created_at
         FROM events WHERE issue_id = ?1 ORDER BY created_at, id",
    )?;

    let events = stmt
        .query_map(params![issue_id], |row| {
            let type_str: String = row.get(2)?;
            let created_str: String = row.get(6)?;
            Ok(TimelineEvent {
                id: row.get(0)?,
                issue_id: row.get(1)?,
                event_type: parse_db(&type_str, "event_type")?,
                old_value: row.get(3)?,
                new_value: row.get(4)?,
                details: row.get(5)?,
                created_at: parse_timestamp(&created_str, "created_at")?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(events)
}

/// Insert a comment, returning its assigned id.
pub(crate) fn insert_comment(conn: &Connection, comment: &Comment) -> Result<i64> {
    conn.execute(
        "INSERT INTO comments (issue_id, author_id, body, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            comment.issue_id,
            comment.author_id,
            comment.body,
            comment.created_at.to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Fetch all comments for an issue in insertion order.
pub(crate) fn fetch_comments(conn: &Connection, issue_id: i64) -> Result<Vec<Comment>> {
    let mut stmt = conn.prepare(
        "SELECT id, issue_id, author_id, body, created_at
         FROM comments WHERE issue_id = ?1 ORDER BY id",
    )?;

    let comments = stmt
        .query_map(params![issue_id], |row| {
            let created_str: String = row.get(4)?;
            Ok(Comment {
                id: row.get(0)?,
                issue_id: row.get(1)?,
                author_id: row.get(2)?,
                body: row.get(3)?,
                created_at: parse_timestamp(&created_str, "created_at")?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(comments)
}

/// Insert a label, returning its assigned id. Fails on duplicate name.
pub(crate) fn insert_label(conn: &Connection, name: &str) -> Result<i64> {
    let exists: i64 = conn.query_row(
        "SELECT COUNT(*) FROM labels WHERE name = ?1",
        params![name],
        |row| row.get(0),
    )?;
    if exists > 0 {
        return Err(Error::DuplicateLabel(name.to_string()));
    }

    conn.execute("INSERT INTO labels (name) VALUES (?1)", params![name])?;
    Ok(conn.last_insert_rowid())
}

/// Fetch a label by id.
pub(crate) fn fetch_label(conn: &Connection, id: i64) -> Result<Label> {
    let label = conn
        .query_row(
            "SELECT id, name FROM labels WHERE id = ?1",
            params![id],
            |row| {
                Ok(Label {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            },
        )
        .optional()?;

    label.ok_or(Error::LabelNotFound(id))
}

/// Fetch all labels, ordered by name.
pub(crate) fn fetch_all_labels(conn: &Connection) -> Result<Vec<Label>> {
    let mut stmt = conn.prepare("SELECT id, name FROM labels ORDER BY name")?;

    let labels = stmt
        .query_map([], |row| {
            Ok(Label {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(labels)
}

/// Fetch the labels attached to an issue, ordered by name.
pub(crate) fn fetch_issue_labels(conn: &Connection, issue_id: i64) -> Result<Vec<Label>> {
    let mut stmt = conn.prepare(
        "SELECT l.id, l.name FROM labels l
         JOIN issue_labels il ON il.label_id = l.id
         WHERE il.issue_id = ?1 ORDER BY l.name",
    )?;

    let labels = stmt
        .query_map(params![issue_id], |row| {
            Ok(Label {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(labels)
}

/// Replace the label set attached to an issue.
pub(crate) fn replace_issue_labels(
    conn: &Connection,
    issue_id: i64,
    label_ids: &[i64],
) -> Result<()> {
    conn.execute(
        "DELETE FROM issue_labels WHERE issue_id = ?1",
        params![issue_id],
    )?;
    for label_id in label_ids {
        conn.execute(
            "INSERT OR IGNORE INTO issue_labels (issue_id, label_id) VALUES (?1, ?2)",
            params![issue_id, label_id],
        )?;
    }
    Ok(())
}

/// Delete a label row and every reference to it. Returns the ids of
/// issues that carried the label.
pub(crate) fn delete_label(conn: &Connection, label_id: i64) -> Result<Vec<i64>> {
    let mut stmt =
        conn.prepare("SELECT issue_id FROM issue_labels WHERE label_id = ?1 ORDER BY issue_id")?;
    let carriers = stmt
        .query_map(params![label_id], |row| row.get(0))?
        .collect::<std::result::Result<Vec<i64>, _>>()?;

    conn.execute(
        "DELETE FROM issue_labels WHERE label_id = ?1",
        params![label_id],
    )?;
    let affected = conn.execute("DELETE FROM labels WHERE id = ?1", params![label_id])?;
    if affected == 0 {
        return Err(Error::LabelNotFound(label_id));
    }

    Ok(carriers)
}

/// Insert a user, returning the assigned id. Fails on duplicate email.
pub(crate) fn insert_user(conn: &Connection, name: &str, email: &str) -> Result<i64> {
    let exists: i64 = conn.query_row(
        "SELECT COUNT(*) FROM users WHERE email = ?1",
        params![email],
        |row| row.get(0),
    )?;
    if exists > 0 {
        return Err(Error::DuplicateEmail(email.to_string()));
    }

    conn.execute(
        "INSERT INTO users (name, email) VALUES (?1, ?2)",
        params![name, email],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Fetch a user by id.
pub(crate) fn fetch_user(conn: &Connection, id: i64) -> Result<User> {
    let user = conn
        .query_row(
            "SELECT id, name, email FROM users WHERE id = ?1",
            params![id],
            |row| {
                Ok(User {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    email: row.get(2)?,
                })
            },
        )
        .optional()?;

    user.ok_or(Error::UserNotFound(id))
}

/// Check whether a user exists.
pub(crate) fn user_exists(conn: &Connection, id: i64) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM users WHERE id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Fetch all users in insertion order.
pub(crate) fn fetch_all_users(conn: &Connection) -> Result<Vec<User>> {
    let mut stmt = conn.prepare("SELECT id, name, email FROM users ORDER BY id")?;

    let users = stmt
        .query_map([], |row| {
            Ok(User {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(users)
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
