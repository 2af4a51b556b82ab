// SPDX-License-Identifier: MIT
// Copyright (c) 2026 trk contributors

//! Bulk CSV import with per-row failure accounting.
//!
//! Each data row is validated and created independently: a bad row is
//! recorded in the result and processing continues. There is no
//! cross-row transaction, so re-running the same input creates
//! duplicate issues.
//!
//! Expected format: a header row with at least `title`; optional
//! `description`, `status` (open | in_progress | closed; unknown
//! values reject the row), and `assignee_id` (integer referencing an
//! existing user). Unknown columns are ignored.

use serde::Serialize;
use std::io::Read;

use crate::error::{Error, Result};
use crate::issue::{validate_title, NewIssue};
use crate::store::IssueStore;

/// A single rejected row: its 0-based data-row index and the reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowError {
    pub row_index: usize,
    pub reason: String,
}

/// Aggregate outcome of one import invocation. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportResult {
    /// Number of issues created.
    pub created: usize,
    /// Number of rejected rows.
    pub failed: usize,
    /// Rejections in input row order.
    pub errors: Vec<RowError>,
}

impl ImportResult {
    fn reject(&mut self, row_index: usize, reason: String) {
        self.failed += 1;
        self.errors.push(RowError { row_index, reason });
    }
}

/// Column positions resolved from the header row.
struct Columns {
    title: usize,
    description: Option<usize>,
    status: Option<usize>,
    assignee_id: Option<usize>,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
        let title = find("title").ok_or_else(|| Error::Validation {
            field: "csv",
            reason: "missing required column 'title'".to_string(),
        })?;
        Ok(Columns {
            title,
            description: find("description"),
            status: find("status"),
            assignee_id: find("assignee_id"),
        })
    }

    /// Map one record to a creation request, or a rejection reason.
    fn to_request(&self, record: &csv::StringRecord) -> std::result::Result<NewIssue, String> {
        let field = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .map(str::trim)
                .filter(|s| !s.is_empty())
        };

        let title = record.get(self.title).map(str::trim).unwrap_or("");
        validate_title(title).map_err(|e| e.to_string())?;

        let status = match field(self.status) {
            Some(s) => Some(s.parse().map_err(|e: Error| e.to_string())?),
            None => None,
        };
        let assignee_id = match field(self.assignee_id) {
            Some(s) => Some(
                s.parse::<i64>()
                    .map_err(|_| format!("invalid assignee_id: '{s}'"))?,
            ),
            None => None,
        };

        Ok(NewIssue {
            title: title.to_string(),
            description: field(self.description).map(String::from),
            status,
            assignee_id,
            labels: Vec::new(),
        })
    }
}

/// Import issues from CSV. Row failures (malformed records, validation
/// errors, store rejections such as an unknown assignee) are captured
/// per row; only reader-level failures and a missing title column
/// abort the whole import.
pub fn import_csv<R: Read>(store: &mut IssueStore, reader: R) -> Result<ImportResult> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let columns = Columns::resolve(&headers)?;

    let mut result = ImportResult::default();
    for (row_index, record) in rdr.records().enumerate() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                result.reject(row_index, format!("malformed row: {e}"));
                continue;
            }
        };

        match columns.to_request(&record) {
            Ok(req) => match store.create(req) {
                Ok(_) => result.created += 1,
                Err(e) => result.reject(row_index, e.to_string()),
            },
            Err(reason) => result.reject(row_index, reason),
        }
    }

    Ok(result)
}

#[cfg(test)]
#[path = "import_tests.rs"]
mod tests;
