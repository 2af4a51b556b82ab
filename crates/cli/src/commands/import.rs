// SPDX-License-Identifier: MIT
// Copyright (c) 2026 trk contributors

use std::fs::File;
use std::path::Path;

use trk_core::import_csv;

use crate::cli::OutputFormat;
use crate::error::{Error, Result};

use super::open_store;

pub fn execute(file: &str, output: OutputFormat) -> Result<()> {
    let path = Path::new(file);
    if !path.exists() {
        return Err(Error::ImportFileNotFound(file.to_string()));
    }

    let mut store = open_store()?;
    let reader = File::open(path)?;
    let result = import_csv(&mut store, reader)?;

    match output {
        OutputFormat::Text => {
            println!("Imported {} issue(s), {} failed", result.created, result.failed);
            for error in &result.errors {
                println!("  row {}: {}", error.row_index, error.reason);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }
    Ok(())
}
