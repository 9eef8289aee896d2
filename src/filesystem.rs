//! Line-oriented whole-file read/modify/write helpers for configuration files
//!
//! Apache does not require its configuration to be UTF-8, so lines are raw
//! bytes. Lines keep their original terminators so that a rewrite leaves every
//! untouched line byte-identical, and a file whose lines did not change is
//! never written back.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// One line of a configuration file, terminator included
pub type Line = Vec<u8>;

/// Split content into lines, each keeping its trailing `\n` (the last line may lack one)
pub fn split_lines(content: &[u8]) -> Vec<Line> {
    content
        .split_inclusive(|&byte| byte == b'\n')
        .map(<[u8]>::to_vec)
        .collect()
}

/// Read a file as lines with their terminators
pub fn read_lines(path: &Path) -> Result<Vec<Line>> {
    let content = fs::read(path).map_err(|e| Error::Filesystem {
        message: format!("Failed to read file '{}': {}", path.display(), e),
    })?;
    Ok(split_lines(&content))
}

/// Replace the whole content of a file with the given lines
pub fn write_lines(path: &Path, lines: &[Line]) -> Result<()> {
    fs::write(path, lines.concat()).map_err(|e| Error::Filesystem {
        message: format!("Failed to write file '{}': {}", path.display(), e),
    })
}

/// Apply a pure line rewrite to a file, writing back only when something changed.
///
/// Returns whether the file was written.
pub fn rewrite_if_changed<F>(path: &Path, rewrite: F) -> Result<bool>
where
    F: FnOnce(&[Line]) -> (Vec<Line>, bool),
{
    let lines = read_lines(path)?;
    let (new_lines, changed) = rewrite(&lines);
    if changed {
        write_lines(path, &new_lines)?;
    }
    Ok(changed)
}

/// Whether `line` contains `needle` anywhere
pub fn contains(line: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || line.windows(needle.len()).any(|window| window == needle)
}

/// Overwrite a file with `content`, creating parent directories if needed
pub fn write_string(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::Filesystem {
            message: format!("Failed to create directory '{}': {}", parent.display(), e),
        })?;
    }
    fs::write(path, content).map_err(|e| Error::Filesystem {
        message: format!("Failed to write file '{}': {}", path.display(), e),
    })
}

/// Remove a file or symlink; a path that is already gone is not an error.
///
/// Returns whether something was removed.
pub fn remove_if_present(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::Filesystem {
            message: format!("Failed to remove file '{}': {}", path.display(), e),
        }),
    }
}
