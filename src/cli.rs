//! CLI argument parsing, logging setup and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Apply user overrides to an Apache 2 configuration tree
#[derive(Parser, Debug)]
#[command(name = "configure-apache2")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply an override file to the Apache 2 configuration
    Apply(commands::apply::ApplyArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level)?;

        match self.command {
            Commands::Apply(args) => commands::apply::execute(args),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

fn init_logging(level: &str) -> Result<()> {
    let filter: log::LevelFilter = level
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid log level: {}", level))?;

    env_logger::Builder::new()
        .filter_level(filter)
        .format_timestamp(None)
        .format_target(false)
        .try_init()?;
    Ok(())
}
