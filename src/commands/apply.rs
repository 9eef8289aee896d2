//! Apply command implementation
//!
//! Builds the configuration section (from a section file or from flags),
//! then runs the orchestrator once against the configuration tree under
//! `--root`.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the apply command
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// YAML section file with `name` and `config` keys
    #[arg(short, long, value_name = "PATH", conflicts_with = "file_name")]
    pub section: Option<PathBuf>,

    /// Section name used when no section file is given
    #[arg(long, value_name = "NAME", default_value = "apache2")]
    pub name: String,

    /// Override file name, relative to --directory, used when no section file is given
    #[arg(long, value_name = "NAME")]
    pub file_name: Option<String>,

    /// Directory holding the user-supplied override files
    #[arg(
        short,
        long,
        value_name = "PATH",
        env = "CONFIGURE_APACHE2_INPUT_DIR",
        default_value = "."
    )]
    pub directory: PathBuf,

    /// Filesystem root containing etc/apache2 and var/www
    #[arg(long, value_name = "PATH", env = "CONFIGURE_APACHE2_ROOT", default_value = "/")]
    pub root: PathBuf,

    /// Legacy document root; a different non-default value conflicts with the override
    #[arg(long, value_name = "VALUE", env = "DOCUMENT_ROOT")]
    pub legacy_document_root: Option<String>,

    /// Expand ${VAR} references in override values from the environment
    #[arg(long)]
    pub expand_env: bool,
}

/// Execute the apply command
pub fn execute(args: ApplyArgs) -> Result<()> {
    use configure_apache2::layout::ApacheLayout;
    use configure_apache2::process::Apache2Process;
    use configure_apache2::section::{self, ConfigSection, CONFIGURATION_FILE_NAME};
    use configure_apache2::translator::EnvExpander;
    use log::debug;

    let section = match &args.section {
        Some(path) => section::from_file(path).map_err(|e| {
            anyhow::anyhow!("Failed to load section file {}: {}", path.display(), e)
        })?,
        None => {
            let section = ConfigSection::new(args.name.clone());
            match &args.file_name {
                Some(file_name) => section.with_value(CONFIGURATION_FILE_NAME, file_name.clone()),
                None => section,
            }
        }
    };

    let mut process = Apache2Process::new(ApacheLayout::new(&args.root))
        .with_legacy_document_root(args.legacy_document_root.clone());
    if args.expand_env {
        process = process.with_translator(EnvExpander::from_env()?);
    }

    debug!(
        "Applying {} overrides from {} to {}",
        section.name,
        args.directory.display(),
        args.root.display()
    );
    let report = process.process(&section, &args.directory)?;

    if !report.skipped() {
        debug!("Applied {} override values", report.values.len());
    }

    Ok(())
}
