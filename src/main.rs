//! # icon CLI
//!
//! This is the binary entry point for the `icon` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Initializing logging from the global `--log-level` flag.
//! - Executing the appropriate command based on the parsed arguments.
//!
//! The installers' building blocks live in the `icon` library crate; the
//! binary wires them to subcommands.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
