//! # Override File Loading
//!
//! Users customise an image by dropping an override file into the input
//! directory. This module resolves the file's format from its extension and
//! flattens it into [`OverrideValues`]: a mapping from lowercase key to string
//! value.
//!
//! ## Supported Formats
//!
//! | Extension            | Format                 | Parser       |
//! |----------------------|------------------------|--------------|
//! | `.yaml`, `.yml`      | [`FileFormat::Yaml`]     | `serde_yaml` |
//! | `.json`              | [`FileFormat::Json`]     | `serde_json` |
//! | `.toml`              | [`FileFormat::Toml`]     | `toml`       |
//! | anything else        | [`FileFormat::KeyValue`] | `rust-ini`   |
//!
//! Structured formats must hold a top-level mapping of scalars. Key/value
//! files may use `[section]` headers, in which case keys become
//! `section.key`.
//!
//! Every failure is reported as [`Error::OverrideFile`], which callers are
//! free to treat as "nothing to configure".

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Lowercase key to string value mapping read from an override file
pub type OverrideValues = BTreeMap<String, String>;

/// Format tag of a parsed override file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// `key = value` lines, optionally grouped in `[section]` blocks
    KeyValue,
    Yaml,
    Json,
    Toml,
}

impl FileFormat {
    /// Pick a format from the file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            Some("json") => FileFormat::Json,
            Some("toml") => FileFormat::Toml,
            _ => FileFormat::KeyValue,
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileFormat::KeyValue => "key/value",
            FileFormat::Yaml => "yaml",
            FileFormat::Json => "json",
            FileFormat::Toml => "toml",
        };
        f.write_str(name)
    }
}

/// Load an override file and return its values with the detected format.
///
/// # Errors
///
/// Returns [`Error::OverrideFile`] when the file is missing, unreadable,
/// malformed, or not a flat mapping of scalars.
pub fn read_custom_file<P: AsRef<Path>>(path: P) -> Result<(OverrideValues, FileFormat)> {
    let path = path.as_ref();
    let format = FileFormat::from_path(path);

    let values = std::fs::read_to_string(path)
        .map_err(Error::Io)
        .and_then(|content| parse(&content, format))
        .map_err(|e| Error::OverrideFile {
            path: path.display().to_string(),
            message: match e {
                Error::Io(io) => io.to_string(),
                other => other.to_string(),
            },
        })?;

    Ok((values, format))
}

/// Parse override file content in the given format
pub fn parse(content: &str, format: FileFormat) -> Result<OverrideValues> {
    match format {
        FileFormat::KeyValue => parse_key_value(content),
        FileFormat::Yaml => {
            let document: serde_json::Value = serde_yaml::from_str(content)?;
            flatten_json(document)
        }
        FileFormat::Json => {
            let document: serde_json::Value = serde_json::from_str(content)?;
            flatten_json(document)
        }
        FileFormat::Toml => parse_toml(content),
    }
}

fn parse_key_value(content: &str) -> Result<OverrideValues> {
    let document = ini::Ini::load_from_str(content)?;
    let mut values = OverrideValues::new();

    for (section, properties) in document.iter() {
        for (key, value) in properties.iter() {
            let key = match section {
                Some(section) => format!("{}.{}", section, key),
                None => key.to_string(),
            };
            values.insert(key.to_lowercase(), value.to_string());
        }
    }

    Ok(values)
}

fn flatten_json(document: serde_json::Value) -> Result<OverrideValues> {
    use serde_json::Value;

    let map = match document {
        Value::Object(map) => map,
        // An empty YAML document
        Value::Null => return Ok(OverrideValues::new()),
        other => return Err(malformed(format!("expected a mapping, found {}", other))),
    };

    let mut values = OverrideValues::new();
    for (key, value) in map {
        let value = match value {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => s,
            Value::Array(_) | Value::Object(_) => {
                return Err(malformed(format!("value of '{}' is not a scalar", key)))
            }
        };
        values.insert(key.to_lowercase(), value);
    }

    Ok(values)
}

fn parse_toml(content: &str) -> Result<OverrideValues> {
    use toml::Value;

    let table: toml::Table = toml::from_str(content)?;
    let mut values = OverrideValues::new();

    for (key, value) in table {
        let value = match value {
            Value::String(s) => s,
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Datetime(d) => d.to_string(),
            Value::Array(_) | Value::Table(_) => {
                return Err(malformed(format!("value of '{}' is not a scalar", key)))
            }
        };
        values.insert(key.to_lowercase(), value);
    }

    Ok(values)
}

fn malformed(message: String) -> Error {
    Error::MalformedOverrides { message }
}
