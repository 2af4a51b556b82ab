// SPDX-License-Identifier: MIT
// Copyright (c) 2026 trk contributors

//! Project configuration management.
//!
//! Configuration is stored in `.trk/config.toml` next to the SQLite
//! database. `find_work_dir` walks up from the current directory so
//! trk works from anywhere inside a project.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

const WORK_DIR_NAME: &str = ".trk";
const CONFIG_FILE_NAME: &str = "config.toml";
const DB_FILE_NAME: &str = "issues.db";
const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Project configuration stored in `.trk/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Optional path for the database (relative to the work dir or
    /// absolute). Defaults to `issues.db` inside the work dir.
    pub workspace: Option<String>,
}

impl Config {
    /// Load configuration from a work directory.
    pub fn load(work_dir: &Path) -> Result<Self> {
        let config_path = work_dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(config_path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save configuration to a work directory.
    pub fn save(&self, work_dir: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(work_dir.join(CONFIG_FILE_NAME), content)?;
        Ok(())
    }
}

/// Initialize a new `.trk/` directory under `root`.
pub fn init_work_dir(root: &Path) -> Result<PathBuf> {
    let work_dir = root.join(WORK_DIR_NAME);
    if work_dir.exists() {
        return Err(Error::AlreadyInitialized(work_dir.display().to_string()));
    }

    fs::create_dir_all(&work_dir)?;
    Config::default().save(&work_dir)?;

    // The database is local state; keep it out of version control
    fs::write(
        work_dir.join(GITIGNORE_FILE_NAME),
        "issues.db\nissues.db-wal\nissues.db-shm\n",
    )?;

    Ok(work_dir)
}

/// Find the nearest `.trk/` directory, walking up from the current
/// directory.
pub fn find_work_dir() -> Result<PathBuf> {
    let mut dir = std::env::current_dir()?;
    loop {
        let candidate = dir.join(WORK_DIR_NAME);
        if candidate.is_dir() {
            return Ok(candidate);
        }
        if !dir.pop() {
            return Err(Error::NotInitialized);
        }
    }
}

/// Resolve the database path for a work directory and its config.
pub fn get_db_path(work_dir: &Path, config: &Config) -> PathBuf {
    match &config.workspace {
        Some(workspace) => {
            let path = Path::new(workspace);
            if path.is_absolute() {
                path.join(DB_FILE_NAME)
            } else {
                work_dir.join(path).join(DB_FILE_NAME)
            }
        }
        None => work_dir.join(DB_FILE_NAME),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
