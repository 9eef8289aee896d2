//! # configure-apache2
//!
//! This library applies user-supplied overrides to an Apache 2 configuration
//! tree at image build or first-boot time. It is used by the
//! `configure-apache2` command-line tool, but the orchestrator can be driven
//! directly by any provisioning step that already has a configuration section
//! in hand.
//!
//! ## Quick Example
//!
//! ```no_run
//! use configure_apache2::layout::ApacheLayout;
//! use configure_apache2::process::Apache2Process;
//! use configure_apache2::section::ConfigSection;
//! use std::path::Path;
//!
//! let section = ConfigSection::new("apache2")
//!     .with_value("configuration_file_name", "apache2.env");
//!
//! let report = Apache2Process::new(ApacheLayout::new("/"))
//!     .with_legacy_document_root(std::env::var("DOCUMENT_ROOT").ok())
//!     .process(&section, Path::new("/mnt/custom"))
//!     .unwrap();
//!
//! if report.skipped() {
//!     println!("no overrides supplied");
//! }
//! ```
//!
//! ## Core Concepts
//!
//! - **Sections (`section`)**: The named configuration block that tells the
//!   applier which override file to read.
//! - **Override files (`overrides`)**: Key/value, YAML, JSON or TOML files
//!   flattened into lowercase keys and string values.
//! - **Translators (`translator`)**: An optional hook that rewrites each value
//!   before it is applied.
//! - **Layout (`layout`)**: The fixed set of Apache 2 paths, resolved under an
//!   explicit root.
//! - **Rewrites (`rewrite`)**: Document root, compression and fancy indexing
//!   edits, each a pure line transformation plus a disk wrapper.
//! - **Orchestrator (`process`)**: Validation, loading, translation and the
//!   fixed-order dispatch to the rewrites.

pub mod error;
pub mod filesystem;
pub mod layout;
pub mod overrides;
pub mod process;
pub mod rewrite;
pub mod section;
pub mod translator;

#[cfg(test)]
mod rewrite_proptest;
