// SPDX-License-Identifier: MIT
// Copyright (c) 2026 trk contributors

use crate::error::Result;

use super::open_store;

pub fn execute(issue_id: i64, author_id: i64, body: &str) -> Result<()> {
    let mut store = open_store()?;
    let comment = store.add_comment(issue_id, author_id, body)?;
    println!("Added comment {} to issue #{}", comment.id, issue_id);
    Ok(())
}
