//! Completions command implementation
//!
//! Renders a `clap_complete` script for the `configure-apache2` command tree.
//! Image builds usually bake the script into the image, so besides stdout it
//! can be written straight to a file with `--output`.
//!
//! ```bash
//! configure-apache2 completions bash --output /usr/share/bash-completion/completions/configure-apache2
//! configure-apache2 completions            # shell taken from $SHELL
//! ```

use anyhow::{anyhow, Context, Result};
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use log::debug;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::cli::Cli;

/// Arguments for the completions command
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate the script for; detected from $SHELL when omitted
    #[arg(value_enum)]
    pub shell: Option<Shell>,

    /// Write the script to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Render the completion script for `shell`
pub fn render(shell: Shell) -> Vec<u8> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    let mut script = Vec::new();
    generate(shell, &mut cmd, name, &mut script);
    script
}

/// Execute the completions command
pub fn execute(args: CompletionsArgs) -> Result<()> {
    let shell = match args.shell {
        Some(shell) => shell,
        None => Shell::from_env()
            .ok_or_else(|| anyhow!("Unable to detect the shell from $SHELL; pass it explicitly"))?,
    };
    let script = render(shell);

    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {}", parent.display()))?;
            }
            fs::write(path, &script)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            debug!("Wrote {} completions to {}", shell, path.display());
        }
        None => io::stdout().write_all(&script)?,
    }
    Ok(())
}
