// SPDX-License-Identifier: MIT
// Copyright (c) 2026 trk contributors

use crate::cli::{LabelCommand, OutputFormat};
use crate::error::Result;

use super::open_store;

pub fn execute(command: LabelCommand) -> Result<()> {
    match command {
        LabelCommand::New { name } => new(&name),
        LabelCommand::List { output } => list(output),
        LabelCommand::Delete { id } => delete(id),
    }
}

fn new(name: &str) -> Result<()> {
    let mut store = open_store()?;
    let label = store.create_label(name)?;
    println!("Created label {} '{}'", label.id, label.name);
    Ok(())
}

fn list(output: OutputFormat) -> Result<()> {
    let store = open_store()?;
    let labels = store.list_labels()?;

    match output {
        OutputFormat::Text => {
            if labels.is_empty() {
                println!("No labels");
            } else {
                for label in &labels {
                    println!("{:>4}  {}", label.id, label.name);
                }
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&labels)?),
    }
    Ok(())
}

fn delete(id: i64) -> Result<()> {
    let mut store = open_store()?;
    store.delete_label(id)?;
    println!("Deleted label {}", id);
    Ok(())
}
