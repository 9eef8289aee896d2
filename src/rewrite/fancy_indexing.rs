//! Fancy indexing rewrite
//!
//! Directory listings only show icons when `/icons/` is aliased to the
//! shared icon directory in `mods-available/alias.conf`. Enabling fancy
//! indexing makes sure that alias is active; disabling comments it out.

use crate::error::Result;
use crate::filesystem::{self, contains, Line};
use crate::layout::ApacheLayout;

/// Override key controlling icon display in directory listings
pub const FANCY_INDEXING_KEY: &str = "fancy_indexing";

/// The alias directive this rewrite manages
pub const ICONS_ALIAS: &str = "Alias /icons/ \"/usr/share/apache2/icons/\"";

const DIRECTORY_TAG: &str = "<Directory";

const LABEL: &str = "FANCY INDEXING";

/// Interpret a boolean-ish override value.
///
/// `false`, `no`, `off`, `0`, `disabled` and the empty string (any case,
/// trimmed) are false; everything else is true.
pub fn parse_flag(value: &str) -> bool {
    let value = value.trim().to_ascii_lowercase();
    !matches!(
        value.as_str(),
        "" | "false" | "no" | "off" | "0" | "disabled"
    )
}

/// Make the icons alias active or commented out.
///
/// An existing alias line (commented or not) is normalised in place. When
/// enabling and no such line exists, one is inserted before the first
/// `<Directory` block, or appended if there is none.
pub fn toggle_icons_alias(lines: &[Line], enabled: bool) -> (Vec<Line>, bool) {
    let replacement = if enabled {
        format!("\t{}\n", ICONS_ALIAS)
    } else {
        format!("\t# {}\n", ICONS_ALIAS)
    }
    .into_bytes();

    let mut found = false;
    let mut changed = false;
    let mut new_lines: Vec<Line> = lines
        .iter()
        .map(|line| {
            if contains(line, ICONS_ALIAS.as_bytes()) {
                found = true;
                changed |= *line != replacement;
                replacement.clone()
            } else {
                line.clone()
            }
        })
        .collect();

    if !found && enabled {
        match new_lines
            .iter()
            .position(|line| contains(line, DIRECTORY_TAG.as_bytes()))
        {
            Some(index) => {
                new_lines.insert(index, b"\n".to_vec());
                new_lines.insert(index, replacement);
            }
            None => {
                if let Some(last) = new_lines.last_mut() {
                    if !last.ends_with(b"\n") {
                        last.push(b'\n');
                    }
                }
                new_lines.push(replacement);
                new_lines.push(b"\n".to_vec());
            }
        }
        changed = true;
    }

    (new_lines, changed)
}

/// Apply a `fancy_indexing` override value to `alias.conf`.
///
/// The file is always written back, even when nothing changed.
pub fn apply(layout: &ApacheLayout, value: &str) -> Result<bool> {
    let enabled = parse_flag(value);
    let path = layout.alias_conf();

    let lines = filesystem::read_lines(&path)?;
    let (new_lines, _) = toggle_icons_alias(&lines, enabled);
    filesystem::write_lines(&path, &new_lines)?;

    super::log_setting(LABEL, enabled);
    Ok(enabled)
}
