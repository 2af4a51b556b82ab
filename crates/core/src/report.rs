// SPDX-License-Identifier: MIT
// Copyright (c) 2026 trk contributors

//! Read-only reporting aggregates, recomputed from the current store
//! snapshot on every call.

use chrono::Duration;
use rusqlite::params;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::db::Database;
use crate::error::Result;
use crate::issue::Status;

/// Per-assignee workload totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssigneeStats {
    pub assignee_id: i64,
    pub name: String,
    pub total_assigned: u64,
    pub total_resolved: u64,
}

/// Issue counts per status. Statuses with no issues report zero.
pub fn status_counts(db: &Database) -> Result<BTreeMap<Status, u64>> {
    let mut counts: BTreeMap<Status, u64> = Status::all().into_iter().map(|s| (s, 0)).collect();

    let mut stmt = db
        .conn
        .prepare("SELECT status, COUNT(*) FROM issues GROUP BY status")?;
    let rows = stmt.query_map([], |row| {
        let status: String = row.get(0)?;
        let count = row.get::<_, i64>(1)? as u64;
        Ok((status, count))
    })?;

    for row in rows {
        let (status, count) = row?;
        if let Ok(status) = status.parse::<Status>() {
            counts.insert(status, count);
        }
    }

    Ok(counts)
}

/// Mean time from creation to first close, over currently closed
/// issues with a recorded resolution time. None when no issue
/// qualifies; never a division by zero.
pub fn average_resolution_time(db: &Database) -> Result<Option<Duration>> {
    let mut stmt = db.conn.prepare(
        "SELECT created_at, resolved_at FROM issues
         WHERE status = 'closed' AND resolved_at IS NOT NULL",
    )?;
    let rows = stmt.query_map([], |row| {
        let created: String = row.get(0)?;
        let resolved: String = row.get(1)?;
        Ok((created, resolved))
    })?;

    let mut total = Duration::zero();
    let mut count: i32 = 0;
    for row in rows {
        let (created, resolved) = row?;
        let created = chrono::DateTime::parse_from_rfc3339(&created)
            .map_err(|e| crate::error::Error::CorruptedData(format!("created_at: {e}")))?;
        let resolved = chrono::DateTime::parse_from_rfc3339(&resolved)
            .map_err(|e| crate::error::Error::CorruptedData(format!("resolved_at: {e}")))?;
        total += resolved.signed_duration_since(created);
        count += 1;
    }

    if count == 0 {
        return Ok(None);
    }
    Ok(Some(total / count))
}

/// The `n` assignees with the most issues, descending by total
/// assigned; ties break by assignee id ascending for determinism.
/// Unassigned issues are not counted.
pub fn top_assignees(db: &Database, n: usize) -> Result<Vec<AssigneeStats>> {
    let mut stmt = db.conn.prepare(
        "SELECT u.id, u.name, COUNT(i.id),
                SUM(CASE WHEN i.status = 'closed' THEN 1 ELSE 0 END)
         FROM issues i JOIN users u ON u.id = i.assignee_id
         GROUP BY u.id, u.name
         ORDER BY COUNT(i.id) DESC, u.id ASC
         LIMIT ?1",
    )?;

    let stats = stmt
        .query_map(params![i64::try_from(n).unwrap_or(i64::MAX)], |row| {
            Ok(AssigneeStats {
                assignee_id: row.get(0)?,
                name: row.get(1)?,
                total_assigned: row.get::<_, i64>(2)? as u64,
                total_resolved: row.get::<_, i64>(3)? as u64,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(stats)
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
