//! # configure-apache2 CLI
//!
//! This is the binary entry point for the `configure-apache2` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Initialising logging.
//! - Executing the selected command and turning library errors into a
//!   non-zero exit status.
//!
//! The core logic lives in the `lib.rs` library crate; the binary is a thin
//! wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
