// SPDX-License-Identifier: MIT
// Copyright (c) 2026 trk contributors

use serde_json::json;
use trk_core::timeline::status_history;

use crate::cli::OutputFormat;
use crate::display::format_event;
use crate::error::Result;

use super::open_store;

pub fn execute(id: i64, history_only: bool, output: OutputFormat) -> Result<()> {
    let store = open_store()?;
    let events = store.timeline(id)?;

    if history_only {
        let history = status_history(&events);
        match output {
            OutputFormat::Text => {
                for (at, status) in &history {
                    println!("  {}  {}", at.format("%Y-%m-%d %H:%M"), status);
                }
            }
            OutputFormat::Json => {
                let doc: Vec<_> = history
                    .iter()
                    .map(|(at, status)| json!({ "at": at, "status": status }))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&doc)?);
            }
        }
        return Ok(());
    }

    match output {
        OutputFormat::Text => {
            if events.is_empty() {
                println!("No events for issue #{}", id);
            } else {
                println!("Timeline for issue #{}:", id);
                for event in &events {
                    println!("{}", format_event(event));
                }
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&events)?),
    }
    Ok(())
}
