//! Document root rewrite
//!
//! Points Apache at `var/www/<value>`: creates the directory, records the
//! value in `etc/DOCUMENT_ROOT` for later provisioning steps, and substitutes
//! `$DOCUMENT_ROOT` / `${DOCUMENT_ROOT}` placeholders in every enabled site,
//! conf and module fragment.
//!
//! Only `${DOCUMENT_ROOT}` and a bare `$DOCUMENT_ROOT` ending at a word
//! boundary are placeholders. Unlike the loose `${?DOCUMENT_ROOT}?` match the
//! image used to apply, `$DOCUMENT_ROOT_DIR` and half-braced forms such as
//! `${DOCUMENT_ROOT` are left alone, since they name other variables.
//!
//! Fragments are handled as bytes, so non-UTF-8 files are rewritten (or left
//! alone) like any other. Every fragment is read and rewritten in memory
//! before anything is written, so a read failure leaves the tree untouched.

use crate::error::{Error, Result};
use crate::filesystem::{self, Line};
use crate::layout::{self, ApacheLayout};
use log::debug;
use regex::bytes::{NoExpand, Regex};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Override key selecting the document root
pub const DOCUMENT_ROOT_KEY: &str = "document_root";

/// Document root the image ships with
pub const DEFAULT_DOCUMENT_ROOT: &str = "html";

const LABEL: &str = "DOCUMENT_ROOT";

/// What the document root rewrite did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRootOutcome {
    pub value: String,
    pub web_root: PathBuf,
    /// Fragments that contained a placeholder and were written back
    pub rewritten: Vec<PathBuf>,
}

/// Pattern matching `${DOCUMENT_ROOT}` and a bare `$DOCUMENT_ROOT` not
/// followed by another identifier character
pub fn placeholder_pattern() -> Result<Regex> {
    Regex::new(r"\$(?:\{DOCUMENT_ROOT\}|DOCUMENT_ROOT\b)").map_err(Error::Regex)
}

/// Substitute every placeholder with `value`, reporting whether any line changed
pub fn substitute_document_root(
    lines: &[Line],
    pattern: &Regex,
    value: &str,
) -> (Vec<Line>, bool) {
    let mut changed = false;
    let new_lines = lines
        .iter()
        .map(|line| {
            let replaced = pattern.replace_all(line, NoExpand(value.as_bytes()));
            changed |= *replaced != line[..];
            replaced.into_owned()
        })
        .collect();
    (new_lines, changed)
}

/// Reject values that would place the document root outside `var/www`
pub fn validate_document_root(value: &str) -> Result<()> {
    let invalid = |message: &str| {
        Err(Error::InvalidDocumentRoot {
            value: value.to_string(),
            message: message.to_string(),
        })
    };

    if value.trim().is_empty() {
        return invalid("value is empty");
    }
    for component in Path::new(value).components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => return invalid("'..' is not allowed"),
            Component::RootDir | Component::Prefix(_) => {
                return invalid("must be relative to var/www")
            }
        }
    }
    Ok(())
}

/// Fail when the legacy environment value names a different, non-default root.
///
/// An unset or empty legacy value counts as the default.
pub fn check_legacy_conflict(requested: &str, legacy: Option<&str>) -> Result<()> {
    let legacy = legacy
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_DOCUMENT_ROOT);

    if legacy != requested && legacy != DEFAULT_DOCUMENT_ROOT {
        return Err(Error::DocumentRootConflict {
            requested: requested.to_string(),
            legacy: legacy.to_string(),
        });
    }
    Ok(())
}

/// Apply a document root to the configuration tree.
///
/// Validation, the legacy conflict check and reading every fragment happen
/// before anything on disk is touched. Fragments without a placeholder are
/// left unwritten.
pub fn apply(layout: &ApacheLayout, value: &str, legacy: Option<&str>) -> Result<DocumentRootOutcome> {
    validate_document_root(value)?;
    check_legacy_conflict(value, legacy)?;

    let pattern = placeholder_pattern()?;
    let mut pending = Vec::new();
    for dir in layout.enabled_dirs() {
        for path in layout::list_files(&dir)? {
            let lines = filesystem::read_lines(&path)?;
            let (new_lines, changed) = substitute_document_root(&lines, &pattern, value);
            if changed {
                pending.push((path, new_lines));
            }
        }
    }

    let web_root = layout.web_root(value);
    fs::create_dir_all(&web_root).map_err(|e| Error::Filesystem {
        message: format!("Failed to create directory '{}': {}", web_root.display(), e),
    })?;

    filesystem::write_string(&layout.document_root_marker(), &format!("{}\n", value))?;

    let mut rewritten = Vec::with_capacity(pending.len());
    for (path, lines) in pending {
        filesystem::write_lines(&path, &lines)?;
        debug!("Substituted document root in {}", path.display());
        rewritten.push(path);
    }

    super::log_setting(LABEL, value);

    Ok(DocumentRootOutcome {
        value: value.to_string(),
        web_root,
        rewritten,
    })
}
