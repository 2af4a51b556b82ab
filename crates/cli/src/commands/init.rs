// SPDX-License-Identifier: MIT
// Copyright (c) 2026 trk contributors

use trk_core::Database;

use crate::config::{get_db_path, init_work_dir, Config};
use crate::error::Result;

pub fn execute() -> Result<()> {
    let root = std::env::current_dir()?;
    let work_dir = init_work_dir(&root)?;

    // Open once so the schema exists before the first command
    let config = Config::load(&work_dir)?;
    Database::open(&get_db_path(&work_dir, &config))?;

    println!("Initialized issue tracker in {}", work_dir.display());
    Ok(())
}
