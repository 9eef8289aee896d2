//! # Apache 2 Configuration Layout
//!
//! Every path the applier reads or writes is resolved under an explicit
//! filesystem root, so a run against `/` in a container and a run against a
//! temporary directory in a test go through the same code.
//!
//! ```text
//! <root>/
//!   etc/DOCUMENT_ROOT                      active document root marker
//!   etc/apache2/sites-enabled/*            rewritten
//!   etc/apache2/conf-enabled/*             rewritten
//!   etc/apache2/mods-enabled/*             rewritten, deflate.* toggled
//!   etc/apache2/mods-available/alias.conf  icons alias toggled
//!   var/www/<document_root>/               created
//! ```

use crate::error::{Error, Result};
use log::warn;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Resolves the fixed set of Apache 2 configuration targets under a root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApacheLayout {
    root: PathBuf,
}

impl ApacheLayout {
    /// Create a layout rooted at `root` (usually `/`)
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn apache2(&self) -> PathBuf {
        self.root.join("etc").join("apache2")
    }

    pub fn sites_enabled(&self) -> PathBuf {
        self.apache2().join("sites-enabled")
    }

    pub fn conf_enabled(&self) -> PathBuf {
        self.apache2().join("conf-enabled")
    }

    pub fn mods_enabled(&self) -> PathBuf {
        self.apache2().join("mods-enabled")
    }

    /// The three directories of enabled configuration fragments, in
    /// sites, conf, mods order
    pub fn enabled_dirs(&self) -> [PathBuf; 3] {
        [
            self.sites_enabled(),
            self.conf_enabled(),
            self.mods_enabled(),
        ]
    }

    /// Module-availability file holding the directory-alias configuration
    pub fn alias_conf(&self) -> PathBuf {
        self.apache2().join("mods-available").join("alias.conf")
    }

    /// Marker file recording the active document root for other provisioning steps
    pub fn document_root_marker(&self) -> PathBuf {
        self.root.join("etc").join("DOCUMENT_ROOT")
    }

    /// Directory served for the given document root value
    pub fn web_root(&self, document_root: &str) -> PathBuf {
        self.root.join("var").join("www").join(document_root)
    }
}

/// List the immediate entries of `dir`, sorted by file name.
///
/// Symlinks are followed, so an `a2enmod` link to a file reports as a file
/// while a dangling link reports as neither file nor directory. A missing
/// directory is logged and treated as empty.
pub fn list_entries(dir: &Path) -> Result<Vec<walkdir::DirEntry>> {
    if !dir.exists() {
        warn!("Configuration directory {} does not exist", dir.display());
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        match entry {
            Ok(entry) => entries.push(entry),
            // Dangling links cannot be followed; they are never rewrite targets
            Err(e) if e.io_error().map(|io| io.kind()) == Some(std::io::ErrorKind::NotFound) => {
                warn!("Skipping unreadable entry in {}: {}", dir.display(), e)
            }
            Err(e) => {
                return Err(Error::Filesystem {
                    message: format!("Failed to list directory '{}': {}", dir.display(), e),
                })
            }
        }
    }

    Ok(entries)
}

/// Paths of the regular files (after following symlinks) directly inside `dir`
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    Ok(list_entries(dir)?
        .into_iter()
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect())
}
