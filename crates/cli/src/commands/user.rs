// SPDX-License-Identifier: MIT
// Copyright (c) 2026 trk contributors

use crate::cli::{OutputFormat, UserCommand};
use crate::error::Result;

use super::open_store;

pub fn execute(command: UserCommand) -> Result<()> {
    match command {
        UserCommand::Add { name, email } => add(&name, &email),
        UserCommand::List { output } => list(output),
    }
}

fn add(name: &str, email: &str) -> Result<()> {
    let mut store = open_store()?;
    let user = store.create_user(name, email)?;
    println!("Added user {} '{}' <{}>", user.id, user.name, user.email);
    Ok(())
}

fn list(output: OutputFormat) -> Result<()> {
    let store = open_store()?;
    let users = store.list_users()?;

    match output {
        OutputFormat::Text => {
            if users.is_empty() {
                println!("No users");
            } else {
                for user in &users {
                    println!("{:>4}  {} <{}>", user.id, user.name, user.email);
                }
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&users)?),
    }
    Ok(())
}
