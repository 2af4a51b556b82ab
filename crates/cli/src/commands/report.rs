// SPDX-License-Identifier: MIT
// Copyright (c) 2026 trk contributors

use serde_json::json;
use trk_core::report::{average_resolution_time, status_counts, top_assignees};

use crate::cli::{OutputFormat, ReportCommand};
use crate::display::format_duration;
use crate::error::Result;

use super::open_store;

pub fn execute(command: ReportCommand) -> Result<()> {
    match command {
        ReportCommand::Status { output } => status(output),
        ReportCommand::Latency { output } => latency(output),
        ReportCommand::TopAssignees { count, output } => assignees(count, output),
    }
}

fn status(output: OutputFormat) -> Result<()> {
    let store = open_store()?;
    let counts = status_counts(store.database())?;

    match output {
        OutputFormat::Text => {
            for (status, count) in &counts {
                println!("{:<12} {}", status.to_string(), count);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&counts)?),
    }
    Ok(())
}

fn latency(output: OutputFormat) -> Result<()> {
    let store = open_store()?;
    let average = average_resolution_time(store.database())?;

    match output {
        OutputFormat::Text => match average {
            Some(duration) => println!("Average resolution time: {}", format_duration(duration)),
            None => println!("No resolved issues yet"),
        },
        OutputFormat::Json => {
            let doc = json!({
                "average_resolution_seconds": average.map(|d| d.num_seconds()),
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
    }
    Ok(())
}

fn assignees(count: usize, output: OutputFormat) -> Result<()> {
    let store = open_store()?;
    let stats = top_assignees(store.database(), count)?;

    match output {
        OutputFormat::Text => {
            if stats.is_empty() {
                println!("No assigned issues");
            } else {
                for entry in &stats {
                    println!(
                        "{:<20} {} assigned, {} resolved",
                        entry.name, entry.total_assigned, entry.total_resolved
                    );
                }
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
    }
    Ok(())
}
