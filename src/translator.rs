//! Per-key value translation applied to override values before any rewrite.

use crate::error::{Error, Result};
use regex::{Captures, Regex};
use std::collections::HashMap;

/// Capability to transform an override value given its key.
///
/// The orchestrator runs every loaded value through the translator, not only
/// the keys it later consumes.
pub trait ValueTranslator {
    /// Return the value to use for `key` in place of `value`
    fn translate(&self, key: &str, value: &str) -> String;
}

impl<F> ValueTranslator for F
where
    F: Fn(&str, &str) -> String,
{
    fn translate(&self, key: &str, value: &str) -> String {
        self(key, value)
    }
}

/// Expands `${NAME}` references in values from a captured variable map.
///
/// Unknown names are left verbatim so that Apache-style `${VAR}` references
/// meant for the server survive untouched.
#[derive(Debug, Clone)]
pub struct EnvExpander {
    vars: HashMap<String, String>,
    pattern: Regex,
}

impl EnvExpander {
    /// Build an expander over the given variables
    pub fn new(vars: HashMap<String, String>) -> Result<Self> {
        let pattern = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").map_err(Error::Regex)?;
        Ok(Self { vars, pattern })
    }

    /// Build an expander over the current process environment
    pub fn from_env() -> Result<Self> {
        let vars = std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect();
        Self::new(vars)
    }
}

impl ValueTranslator for EnvExpander {
    fn translate(&self, _key: &str, value: &str) -> String {
        self.pattern
            .replace_all(value, |caps: &Captures| match self.vars.get(&caps[1]) {
                Some(replacement) => replacement.clone(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}
