// SPDX-License-Identifier: MIT
// Copyright (c) 2026 trk contributors

use trk_core::{IssueFilter, IssueSort};

use crate::cli::{OutputFormat, StatusArg};
use crate::display::format_issue_line;
use crate::error::Result;

use super::open_store;

#[allow(clippy::too_many_arguments)]
pub fn execute(
    status: Option<StatusArg>,
    assignee: Option<i64>,
    label: Option<i64>,
    newest: bool,
    limit: Option<usize>,
    offset: usize,
    output: OutputFormat,
) -> Result<()> {
    let store = open_store()?;
    let filter = IssueFilter {
        status: status.map(Into::into),
        assignee_id: assignee,
        label_id: label,
        sort: if newest {
            IssueSort::NewestFirst
        } else {
            IssueSort::InsertionOrder
        },
        limit,
        offset,
    };
    let issues = store.list(&filter)?;

    match output {
        OutputFormat::Text => {
            if issues.is_empty() {
                println!("No issues found");
            } else {
                for issue in &issues {
                    println!("{}", format_issue_line(issue));
                }
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&issues)?),
    }
    Ok(())
}
