// SPDX-License-Identifier: MIT
// Copyright (c) 2026 trk contributors

#![deny(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;

pub use cli::{Cli, Command, LabelCommand, ReportCommand, UserCommand};
pub use error::{Error, Result};

/// Dispatch a parsed command to its implementation.
pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Init => commands::init::execute(),
        Command::New {
            title,
            description,
            status,
            assignee,
            label,
            output,
        } => commands::new::execute(title, description, status, assignee, label, output),
        Command::Show { id, output } => commands::show::execute(id, output),
        Command::List {
            status,
            assignee,
            label,
            newest,
            limit,
            offset,
            output,
        } => commands::list::execute(status, assignee, label, newest, limit, offset, output),
        Command::Edit {
            id,
            title,
            description,
            status,
            assignee,
            unassign,
            labels,
            version,
            output,
        } => commands::edit::execute(
            id,
            title,
            description,
            status,
            assignee,
            unassign,
            labels,
            version,
            output,
        ),
        Command::Comment { id, body, author } => commands::comment::execute(id, author, &body),
        Command::Log {
            id,
            status_history,
            output,
        } => commands::log::execute(id, status_history, output),
        Command::Import { file, output } => commands::import::execute(&file, output),
        Command::Report { command } => commands::report::execute(command),
        Command::Label { command } => commands::label::execute(command),
        Command::User { command } => commands::user::execute(command),
    }
}
