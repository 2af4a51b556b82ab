// SPDX-License-Identifier: MIT
// Copyright (c) 2026 trk contributors

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use clap::Parser;
use tracing_subscriber::EnvFilter;
use trkrs::Cli;

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    if let Err(e) = trkrs::run(cli.command) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
