//! Compression (mod_deflate) rewrite
//!
//! `gzip = OFF` disables compression by removing the enabled `deflate`
//! module files; any other value enables it at that compression level by
//! appending a `DeflateCompressionLevel` directive to `deflate.conf`.

use crate::error::Result;
use crate::filesystem::{self, Line};
use crate::layout::ApacheLayout;
use log::debug;
use std::path::PathBuf;

/// Override key controlling compression
pub const GZIP_KEY: &str = "gzip";

/// Module files that enable mod_deflate
pub const MODULE_FILES: [&str; 2] = ["deflate.conf", "deflate.load"];

/// Directive setting the compression level
pub const LEVEL_DIRECTIVE: &str = "DeflateCompressionLevel";

const LABEL: &str = "GZIP";

/// Requested compression state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompressionState {
    Disabled,
    /// Enabled, with the level to record if one was given
    Enabled { level: Option<String> },
}

impl CompressionState {
    /// `OFF` (trimmed, any case) disables; anything else is a level
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("off") {
            CompressionState::Disabled
        } else if trimmed.is_empty() {
            CompressionState::Enabled { level: None }
        } else {
            CompressionState::Enabled {
                level: Some(trimmed.to_string()),
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, CompressionState::Enabled { .. })
    }

    pub fn level(&self) -> Option<&str> {
        match self {
            CompressionState::Enabled { level } => level.as_deref(),
            CompressionState::Disabled => None,
        }
    }
}

/// What the compression rewrite did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionOutcome {
    pub state: CompressionState,
    pub removed: Vec<PathBuf>,
    pub updated: Vec<PathBuf>,
}

fn active_level(line: &[u8]) -> Option<String> {
    let line = String::from_utf8_lossy(line);
    let mut words = line.split_whitespace();
    match words.next() {
        Some(directive) if directive.eq_ignore_ascii_case(LEVEL_DIRECTIVE) => {
            words.next().map(str::to_string)
        }
        _ => None,
    }
}

/// Append a level directive unless the last active one already sets `level`.
///
/// Apache honours the last directive, so an earlier run's line with a
/// different level stays in place and is overridden by the new one.
pub fn append_level_directive(lines: &[Line], level: &str) -> (Vec<Line>, bool) {
    let current = lines.iter().rev().find_map(|line| active_level(line));
    if current.as_deref() == Some(level) {
        return (lines.to_vec(), false);
    }

    let mut new_lines = lines.to_vec();
    if let Some(last) = new_lines.last_mut() {
        if !last.ends_with(b"\n") {
            last.push(b'\n');
        }
    }
    new_lines.push(format!("{} {}\n", LEVEL_DIRECTIVE, level).into_bytes());
    (new_lines, true)
}

/// Apply a `gzip` override value to `mods-enabled`
pub fn apply(layout: &ApacheLayout, value: &str) -> Result<CompressionOutcome> {
    let state = CompressionState::parse(value);
    let mods_enabled = layout.mods_enabled();
    let mut removed = Vec::new();
    let mut updated = Vec::new();

    for name in MODULE_FILES {
        let path = mods_enabled.join(name);
        match &state {
            CompressionState::Disabled => {
                if filesystem::remove_if_present(&path)? {
                    debug!("Removed {}", path.display());
                    removed.push(path);
                }
            }
            CompressionState::Enabled { level: Some(level) }
                if name.ends_with(".conf") && path.is_file() =>
            {
                if filesystem::rewrite_if_changed(&path, |lines| {
                    append_level_directive(lines, level)
                })? {
                    debug!("Set compression level in {}", path.display());
                    updated.push(path);
                }
            }
            CompressionState::Enabled { .. } => {}
        }
    }

    if let Some(level) = state.level() {
        super::log_setting(LABEL, level);
    }

    Ok(CompressionOutcome {
        state,
        removed,
        updated,
    })
}
