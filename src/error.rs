//! # Error Handling
//!
//! This module defines the centralized error type for `configure-apache2`.
//! It uses the `thiserror` library to create an `Error` enum covering every
//! failure mode of a provisioning run, with messages written for the person
//! reading the image build log.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Variants fall into three groups:
//!   - Fatal configuration defects (`MissingRequiredKey`, `InvalidSection`,
//!     `DocumentRootConflict`, `InvalidDocumentRoot`). These stop the
//!     provisioning pipeline.
//!   - Override file failures (`OverrideFile`). The orchestrator downgrades
//!     these to a logged skip, because a missing override file is the
//!     common case.
//!   - Wrapped lower-level errors (I/O, parsers, regex).
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.

use thiserror::Error;

/// Main error type for configure-apache2 operations
#[derive(Error, Debug)]
pub enum Error {
    /// A key the section must always carry is absent.
    #[error("Required key {key} not present in {section} section of internal configuration")]
    MissingRequiredKey { key: String, section: String },

    /// A section key is present but carries an unusable value.
    #[error("Invalid {section} section: {message}")]
    InvalidSection { section: String, message: String },

    /// The legacy `DOCUMENT_ROOT` environment variable disagrees with the
    /// requested document root.
    #[error("Legacy DOCUMENT_ROOT variable is present with a conflicting value: {legacy} (requested {requested})")]
    DocumentRootConflict { requested: String, legacy: String },

    /// The requested document root cannot live under `var/www`.
    #[error("Invalid document root '{value}': {message}")]
    InvalidDocumentRoot { value: String, message: String },

    /// The override file could not be read or parsed.
    #[error("Unable to read custom file {path}: {message}")]
    OverrideFile { path: String, message: String },

    /// The override file parsed but is not a flat mapping of scalars.
    #[error("Malformed override values: {message}")]
    MalformedOverrides { message: String },

    /// A target configuration file could not be read, written or removed.
    #[error("Filesystem operation error: {message}")]
    Filesystem { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON parsing error, wrapped from `serde_json::Error`.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// A TOML parsing error, wrapped from `toml::de::Error`.
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A key/value file parsing error, wrapped from `ini::ParseError`.
    #[error("Key/value parsing error: {0}")]
    Ini(#[from] ini::ParseError),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl Error {
    /// Whether the orchestrator treats this error as "nothing to configure"
    /// rather than a build-time defect.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::OverrideFile { .. })
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
