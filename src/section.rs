//! # Configuration Sections
//!
//! A [`ConfigSection`] identifies one invocation of the configuration applier:
//! a `name` used in log lines and errors, plus a free-form `config` mapping
//! supplied by the surrounding provisioning pipeline. The applier only reads
//! the section; it never mutates it.
//!
//! Sections are usually written as YAML:
//!
//! ```yaml
//! name: apache2
//! config:
//!   configuration_file_name: apache2.ini
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Key naming the override file inside the input directory.
pub const CONFIGURATION_FILE_NAME: &str = "configuration_file_name";

/// Keys every section must carry.
pub const REQUIRED_KEYS: &[&str] = &[CONFIGURATION_FILE_NAME];

/// One named section of the internal provisioning configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigSection {
    /// Name of this section, used in log lines and error messages.
    pub name: String,
    /// Arbitrary configuration values for this section.
    #[serde(default)]
    pub config: BTreeMap<String, serde_yaml::Value>,
}

impl ConfigSection {
    /// Create an empty section with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: BTreeMap::new(),
        }
    }

    /// Set a string value, returning the section for chaining
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config
            .insert(key.into(), serde_yaml::Value::String(value.into()));
        self
    }

    /// Fail with [`Error::MissingRequiredKey`] for the first required key
    /// that is absent.
    pub fn validate(&self) -> Result<()> {
        for key in REQUIRED_KEYS {
            if !self.config.contains_key(*key) {
                return Err(Error::MissingRequiredKey {
                    key: (*key).to_string(),
                    section: self.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Name of the override file, relative to the input directory
    pub fn configuration_file_name(&self) -> Result<&str> {
        match self.config.get(CONFIGURATION_FILE_NAME) {
            Some(serde_yaml::Value::String(name)) => Ok(name),
            Some(_) => Err(Error::InvalidSection {
                section: self.name.clone(),
                message: format!("{} must be a string", CONFIGURATION_FILE_NAME),
            }),
            None => Err(Error::MissingRequiredKey {
                key: CONFIGURATION_FILE_NAME.to_string(),
                section: self.name.clone(),
            }),
        }
    }
}

/// Parse a section from YAML text
pub fn parse(yaml_content: &str) -> Result<ConfigSection> {
    serde_yaml::from_str(yaml_content).map_err(Error::Yaml)
}

/// Read and parse a section file
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<ConfigSection> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}
