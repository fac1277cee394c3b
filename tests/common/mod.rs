//! Shared test utilities for the CLI end-to-end tests.
//!
//! Every installer edits files under `$HOME`, so the fixture here is a
//! temporary home directory. Commands built from it run with `HOME` pointing
//! at the fixture and with plain (uncolored) output.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let home = TestHome::new().with_file(".bashrc", "# existing\n");
//!     home.command().args(["--dry-run", "zoxide", "--config"]).assert().success();
//! }
//! ```

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use assert_fs::prelude::*;
use std::path::Path;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    pub use super::TestHome;
}

/// A temporary home directory for running `icon`.
pub struct TestHome {
    temp_dir: assert_fs::TempDir,
}

impl TestHome {
    /// Create an empty home directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a file with the given path (relative to home) and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Add an empty directory.
    pub fn with_dir(self, path: &str) -> Self {
        self.temp_dir
            .child(path)
            .create_dir_all()
            .expect("Failed to create directory");
        self
    }

    /// Path of the home directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Read a file relative to home.
    pub fn read(&self, path: &str) -> String {
        std::fs::read_to_string(self.path().join(path)).expect("Failed to read file")
    }

    /// Create a child path in the home directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// An `icon` command running inside this home directory.
    pub fn command(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("icon");
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("NO_COLOR", "1")
            .env_remove("ICON_LOG")
            .env_remove("ICON_DATA_GIT_URL");
        cmd
    }
}

impl Default for TestHome {
    fn default() -> Self {
        Self::new()
    }
}
