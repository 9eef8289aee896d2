//! Shared test utilities for integration and E2E tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_override("apache2.ini", "gzip=9\n");
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::fixtures;
    pub use super::TestFixture;
}

/// Stock Debian Apache 2 configuration files used to seed the fixture tree.
#[allow(dead_code)]
pub mod fixtures {
    pub const DEFAULT_SITE: &str = include_str!("../testdata/apache2/000-default.conf");
    pub const SECURITY_CONF: &str = include_str!("../testdata/apache2/security.conf");
    pub const DEFLATE_CONF: &str = include_str!("../testdata/apache2/deflate.conf");
    pub const DEFLATE_LOAD: &str = include_str!("../testdata/apache2/deflate.load");
    pub const ALIAS_CONF: &str = include_str!("../testdata/apache2/alias.conf");

    /// The alias line as shipped (commented out)
    pub const ICONS_ALIAS_COMMENTED: &str = "\t#Alias /icons/ \"/usr/share/apache2/icons/\"\n";
    /// The alias line once fancy indexing is enabled
    pub const ICONS_ALIAS_ACTIVE: &str = "\tAlias /icons/ \"/usr/share/apache2/icons/\"\n";
}

/// A temporary filesystem root seeded with an Apache 2 tree, plus an empty
/// input directory for override files.
///
/// ```text
/// <tmp>/root/etc/apache2/sites-enabled/000-default.conf
/// <tmp>/root/etc/apache2/conf-enabled/security.conf
/// <tmp>/root/etc/apache2/mods-enabled/deflate.{conf,load}
/// <tmp>/root/etc/apache2/mods-available/alias.conf
/// <tmp>/input/
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a fixture with the stock Apache 2 tree.
    pub fn new() -> Self {
        let fixture = Self::empty();
        fixture.write("root/etc/apache2/sites-enabled/000-default.conf", fixtures::DEFAULT_SITE);
        fixture.write("root/etc/apache2/conf-enabled/security.conf", fixtures::SECURITY_CONF);
        fixture.write("root/etc/apache2/mods-enabled/deflate.conf", fixtures::DEFLATE_CONF);
        fixture.write("root/etc/apache2/mods-enabled/deflate.load", fixtures::DEFLATE_LOAD);
        fixture.write("root/etc/apache2/mods-available/alias.conf", fixtures::ALIAS_CONF);
        fixture
    }

    /// Create a fixture with only an empty input directory.
    pub fn empty() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child("input")
            .create_dir_all()
            .expect("Failed to create input directory");
        Self { temp_dir }
    }

    /// Add an override file to the input directory.
    pub fn with_override(self, name: &str, content: &str) -> Self {
        self.write(&format!("input/{}", name), content);
        self
    }

    /// Add a file under the filesystem root.
    #[allow(dead_code)]
    pub fn with_root_file(self, path: &str, content: &str) -> Self {
        self.write(&format!("root/{}", path), content);
        self
    }

    /// Add a file with raw (possibly non-UTF-8) content under the filesystem root.
    #[allow(dead_code)]
    pub fn with_root_bytes(self, path: &str, content: &[u8]) -> Self {
        self.temp_dir
            .child(format!("root/{}", path))
            .write_binary(content)
            .expect("Failed to write file");
        self
    }

    fn write(&self, path: &str, content: &str) {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
    }

    /// The filesystem root the applier runs against.
    pub fn root(&self) -> PathBuf {
        self.temp_dir.path().join("root")
    }

    /// The directory holding override files.
    pub fn input(&self) -> PathBuf {
        self.temp_dir.path().join("input")
    }

    /// Read a file relative to the filesystem root.
    pub fn read(&self, path: &str) -> String {
        std::fs::read_to_string(self.root().join(path))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path, e))
    }

    /// Read a file relative to the filesystem root as raw bytes.
    #[allow(dead_code)]
    pub fn read_bytes(&self, path: &str) -> Vec<u8> {
        std::fs::read(self.root().join(path))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path, e))
    }

    /// Whether a path exists relative to the filesystem root.
    pub fn exists(&self, path: &str) -> bool {
        self.root().join(path).exists()
    }

    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create an `apply` command against this fixture with a clean environment.
    #[allow(dead_code)]
    pub fn apply_command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("configure-apache2");
        cmd.current_dir(self.path())
            .env_remove("DOCUMENT_ROOT")
            .env_remove("CONFIGURE_APACHE2_ROOT")
            .env_remove("CONFIGURE_APACHE2_INPUT_DIR")
            .arg("apply")
            .arg("--root")
            .arg(self.root())
            .arg("--directory")
            .arg(self.input());
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
