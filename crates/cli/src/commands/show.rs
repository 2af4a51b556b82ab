// SPDX-License-Identifier: MIT
// Copyright (c) 2026 trk contributors

use serde_json::json;

use crate::cli::OutputFormat;
use crate::display::format_issue_details;
use crate::error::Result;

use super::open_store;

pub fn execute(id: i64, output: OutputFormat) -> Result<()> {
    let store = open_store()?;
    let issue = store.get(id)?;
    let labels = store.labels_of(id)?;
    let comments = store.comments_of(id)?;

    match output {
        OutputFormat::Text => {
            let names: Vec<String> = labels.iter().map(|l| l.name.clone()).collect();
            println!("{}", format_issue_details(&issue, &names));
            if !comments.is_empty() {
                println!("\nComments:");
                for comment in &comments {
                    println!(
                        "  {}  @{}  {}",
                        comment.created_at.format("%Y-%m-%d %H:%M"),
                        comment.author_id,
                        comment.body
                    );
                }
            }
        }
        OutputFormat::Json => {
            let doc = json!({
                "issue": issue,
                "labels": labels,
                "comments": comments,
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
    }
    Ok(())
}
