// SPDX-License-Identifier: MIT
// Copyright (c) 2026 trk contributors

use trk_core::{Issue, IssueStore, NewIssue};

use crate::cli::{OutputFormat, StatusArg};
use crate::display::format_issue_line;
use crate::error::Result;

use super::open_store;

#[allow(clippy::too_many_arguments)]
pub fn execute(
    title: String,
    description: Option<String>,
    status: Option<StatusArg>,
    assignee: Option<i64>,
    labels: Vec<i64>,
    output: OutputFormat,
) -> Result<()> {
    let mut store = open_store()?;
    let issue = execute_impl(&mut store, title, description, status, assignee, labels)?;

    match output {
        OutputFormat::Text => println!("Created {}", format_issue_line(&issue)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&issue)?),
    }
    Ok(())
}

/// Internal implementation that accepts a store for testing.
pub(crate) fn execute_impl(
    store: &mut IssueStore,
    title: String,
    description: Option<String>,
    status: Option<StatusArg>,
    assignee: Option<i64>,
    labels: Vec<i64>,
) -> Result<Issue> {
    let mut req = NewIssue::titled(title);
    req.description = description;
    req.status = status.map(Into::into);
    req.assignee_id = assignee;
    req.labels = labels;
    Ok(store.create(req)?)
}

#[cfg(test)]
#[path = "new_tests.rs"]
mod tests;
