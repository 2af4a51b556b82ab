// SPDX-License-Identifier: MIT
// Copyright (c) 2026 trk contributors

use trk_core::{Issue, IssuePatch, IssueStore};

use crate::cli::{OutputFormat, StatusArg};
use crate::display::format_issue_line;
use crate::error::Result;

use super::open_store;

#[allow(clippy::too_many_arguments)]
pub fn execute(
    id: i64,
    title: Option<String>,
    description: Option<String>,
    status: Option<StatusArg>,
    assignee: Option<i64>,
    unassign: bool,
    labels: Option<Vec<i64>>,
    version: Option<i64>,
    output: OutputFormat,
) -> Result<()> {
    let mut store = open_store()?;
    let issue = execute_impl(
        &mut store,
        id,
        title,
        description,
        status,
        assignee,
        unassign,
        labels,
        version,
    )?;

    match output {
        OutputFormat::Text => println!("Updated {}", format_issue_line(&issue)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&issue)?),
    }
    Ok(())
}

/// Internal implementation that accepts a store for testing.
///
/// Without an explicit expected version the current one is fetched
/// first; the store still rejects the update if another writer lands
/// in between.
#[allow(clippy::too_many_arguments)]
pub(crate) fn execute_impl(
    store: &mut IssueStore,
    id: i64,
    title: Option<String>,
    description: Option<String>,
    status: Option<StatusArg>,
    assignee: Option<i64>,
    unassign: bool,
    labels: Option<Vec<i64>>,
    version: Option<i64>,
) -> Result<Issue> {
    let patch = IssuePatch {
        title,
        description,
        status: status.map(Into::into),
        assignee_id: if unassign {
            Some(None)
        } else {
            assignee.map(Some)
        },
        labels,
    };

    let expected = match version {
        Some(v) => v,
        None => store.get(id)?.version,
    };

    Ok(store.update(id, patch, expected)?)
}

#[cfg(test)]
#[path = "edit_tests.rs"]
mod tests;
