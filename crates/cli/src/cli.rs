// SPDX-License-Identifier: MIT
// Copyright (c) 2026 trk contributors

use clap::{Parser, Subcommand, ValueEnum};
use trk_core::Status;

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

// Custom help template that groups commands into sections
const HELP_TEMPLATE: &str = "{about-with-newline}
{usage-heading} {usage}

{before-help}Options:
{options}{after-help}";

const COMMANDS_HELP: &str = "\
Issue Tracking:
  new         Create a new issue
  show        Show issue details
  list        List issues
  edit        Update an issue (optimistic locking)
  comment     Add a comment to an issue
  log         View an issue's timeline
  label       Manage labels
  user        Manage users

Bulk & Reports:
  import      Import issues from a CSV file
  report      Workload and latency reports

Setup:
  init        Initialize issue tracker";

const QUICKSTART_HELP: &str = "\
Get started:
  trk init                    Initialize tracker
  trk new \"Fix login bug\"     Create an issue
  trk list                    List all issues
  trk edit 1 -s closed        Close issue 1
  trk import backlog.csv      Bulk-import issues";

/// Status values accepted on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum StatusArg {
    Open,
    InProgress,
    Closed,
}

impl From<StatusArg> for Status {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Open => Status::Open,
            StatusArg::InProgress => Status::InProgress,
            StatusArg::Closed => Status::Closed,
        }
    }
}

#[derive(Parser)]
#[command(name = "trk")]
#[command(about = "A SQLite-backed issue tracker with optimistic concurrency control")]
#[command(help_template = HELP_TEMPLATE)]
#[command(before_help = COMMANDS_HELP)]
#[command(after_help = QUICKSTART_HELP)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Initialize issue tracker in the current directory
    Init,

    /// Create a new issue
    #[command(after_help = "Examples:\n  \
        trk new \"Fix login bug\"                Create with title only\n  \
        trk new \"Fix crash\" -d \"on startup\"    Create with description\n  \
        trk new \"User auth\" -a 3 -l 1,2        Assign to user 3, labels 1 and 2")]
    New {
        /// Issue title
        title: String,

        /// Longer description
        #[arg(long, short)]
        description: Option<String>,

        /// Initial status (defaults to open)
        #[arg(long, short)]
        status: Option<StatusArg>,

        /// Assign to a user by id
        #[arg(long, short)]
        assignee: Option<i64>,

        /// Attach label(s) by id (comma-separated or repeated)
        #[arg(long, short, value_delimiter = ',')]
        label: Vec<i64>,

        /// Output format
        #[arg(long, short, default_value = "text")]
        output: OutputFormat,
    },

    /// Show issue details, labels, and comments
    Show {
        /// Issue id
        id: i64,

        /// Output format
        #[arg(long, short, default_value = "text")]
        output: OutputFormat,
    },

    /// List issues
    List {
        /// Filter by status
        #[arg(long, short)]
        status: Option<StatusArg>,

        /// Filter by assignee id
        #[arg(long, short)]
        assignee: Option<i64>,

        /// Filter by label id
        #[arg(long, short)]
        label: Option<i64>,

        /// Show newest issues first (default is insertion order)
        #[arg(long)]
        newest: bool,

        /// Maximum number of issues to show
        #[arg(long)]
        limit: Option<usize>,

        /// Number of issues to skip
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Output format
        #[arg(long, short, default_value = "text")]
        output: OutputFormat,
    },

    /// Update an issue's fields under optimistic locking
    #[command(
        arg_required_else_help = true,
        after_help = "Examples:\n  \
        trk edit 1 -s in_progress             Start work on issue 1\n  \
        trk edit 1 -a 3 --version 2           Assign, expecting version 2\n  \
        trk edit 1 --labels 1,2               Replace the label set\n  \
        trk edit 1 --unassign                 Clear the assignee\n\n\
        Without --version the current version is used; a concurrent\n\
        edit in between is still detected and rejected."
    )]
    Edit {
        /// Issue id
        id: i64,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long, short)]
        description: Option<String>,

        /// New status
        #[arg(long, short)]
        status: Option<StatusArg>,

        /// Assign to a user by id
        #[arg(long, short, conflicts_with = "unassign")]
        assignee: Option<i64>,

        /// Clear the assignee
        #[arg(long)]
        unassign: bool,

        /// Replace the label set with these label ids (comma-separated)
        #[arg(long, value_delimiter = ',', num_args = 0..)]
        labels: Option<Vec<i64>>,

        /// Expected version (optimistic lock); defaults to the current one
        #[arg(long, short)]
        version: Option<i64>,

        /// Output format
        #[arg(long, short, default_value = "text")]
        output: OutputFormat,
    },

    /// Add a comment to an issue
    #[command(arg_required_else_help = true)]
    Comment {
        /// Issue id
        id: i64,

        /// Comment text
        body: String,

        /// Author user id
        #[arg(long, short)]
        author: i64,
    },

    /// View an issue's timeline (oldest first)
    Log {
        /// Issue id
        id: i64,

        /// Show the replayed status history instead of raw events
        #[arg(long)]
        status_history: bool,

        /// Output format
        #[arg(long, short, default_value = "text")]
        output: OutputFormat,
    },

    /// Import issues from a CSV file (title, description, status, assignee_id)
    #[command(after_help = "Rows are validated independently: a bad row is\n\
        reported with its index and the rest of the file still imports.")]
    Import {
        /// Path to the CSV file
        file: String,

        /// Output format
        #[arg(long, short, default_value = "text")]
        output: OutputFormat,
    },

    /// Workload and latency reports
    Report {
        #[command(subcommand)]
        command: ReportCommand,
    },

    /// Manage labels
    Label {
        #[command(subcommand)]
        command: LabelCommand,
    },

    /// Manage users
    User {
        #[command(subcommand)]
        command: UserCommand,
    },
}

#[derive(Subcommand)]
pub enum ReportCommand {
    /// Issue counts per status
    Status {
        /// Output format
        #[arg(long, short, default_value = "text")]
        output: OutputFormat,
    },
    /// Average time from creation to first close
    Latency {
        /// Output format
        #[arg(long, short, default_value = "text")]
        output: OutputFormat,
    },
    /// Assignees with the most issues
    TopAssignees {
        /// Number of assignees to show
        #[arg(long, short, default_value_t = 10)]
        count: usize,

        /// Output format
        #[arg(long, short, default_value = "text")]
        output: OutputFormat,
    },
}

#[derive(Subcommand)]
pub enum LabelCommand {
    /// Create a label
    New {
        /// Unique label name
        name: String,
    },
    /// List all labels
    List {
        /// Output format
        #[arg(long, short, default_value = "text")]
        output: OutputFormat,
    },
    /// Delete a label, detaching it from every issue that carries it
    Delete {
        /// Label id
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum UserCommand {
    /// Register a user
    Add {
        /// Display name
        name: String,

        /// Unique email address
        email: String,
    },
    /// List all users
    List {
        /// Output format
        #[arg(long, short, default_value = "text")]
        output: OutputFormat,
    },
}
