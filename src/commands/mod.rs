//! # CLI Command Implementations
//!
//! Each subcommand of `configure-apache2` lives in its own file with an
//! `Args` struct derived using `clap` and an `execute` function that calls
//! into the `configure_apache2` library.

pub mod apply;
pub mod completions;
