// SPDX-License-Identifier: MIT
// Copyright (c) 2026 trk contributors

pub mod comment;
pub mod edit;
pub mod import;
pub mod init;
pub mod label;
pub mod list;
pub mod log;
pub mod new;
pub mod report;
pub mod show;
pub mod user;

use trk_core::{Database, IssueStore};

use crate::config::{find_work_dir, get_db_path, Config};
use crate::error::Result;

/// Helper to open the issue store from the current context.
pub fn open_store() -> Result<IssueStore> {
    let work_dir = find_work_dir()?;
    let config = Config::load(&work_dir)?;
    let db_path = get_db_path(&work_dir, &config);
    tracing::debug!(path = %db_path.display(), "opening issue database");
    let db = Database::open(&db_path)?;
    Ok(IssueStore::new(db))
}
