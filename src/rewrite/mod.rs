//! # Rewrite Engine
//!
//! Each recognised override setting maps to one targeted edit of the Apache 2
//! configuration tree. The edits are text surgery on files this tool does not
//! own, so every file class is handled by a pure function of the shape
//! `(lines, params) -> (new_lines, changed)` and a thin `apply` wrapper that
//! performs the disk I/O.
//!
//! | Setting          | Module                 | Targets                                  |
//! |------------------|------------------------|------------------------------------------|
//! | `document_root`  | [`document_root`]      | `*-enabled/*`, `etc/DOCUMENT_ROOT`, `var/www/<value>` |
//! | `gzip`           | [`compression`]        | `mods-enabled/deflate.{conf,load}`       |
//! | `fancy_indexing` | [`fancy_indexing`]     | `mods-available/alias.conf`              |

pub mod compression;
pub mod document_root;
pub mod fancy_indexing;

use log::info;
use std::fmt::Display;

/// Format an applied-setting log line: a right-aligned 14 character label and its value
pub fn setting_line(label: &str, value: impl Display) -> String {
    format!("{:>14} = {}", label, value)
}

pub(crate) fn log_setting(label: &str, value: impl Display) {
    info!("{}", setting_line(label, value));
}
