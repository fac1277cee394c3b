//! # Running External Commands
//!
//! Installing a tool almost always means running somebody else's installer,
//! a package manager, or `git`. Commands are written as `bash` snippets with
//! `{placeholder}` slots filled by [`format_cmd`] and executed through a
//! [`Runner`], so `--dry-run` can swap in a [`DryRunner`] that only logs.

use std::path::{Path, PathBuf};
use std::process::Command;

use log::info;

use crate::error::{Error, Result};
use crate::fs::normalize_path;

/// Executes shell snippets.
pub trait Runner {
    /// Run `cmd` with `bash -c`, returning an error on a non-zero exit.
    fn run(&self, cmd: &str) -> Result<()>;

    /// Whether commands are only printed. Callers must not change files the
    /// skipped commands would have recreated.
    fn is_dry_run(&self) -> bool {
        false
    }
}

/// Runs commands with `bash -c`, inheriting stdin, stdout and stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct BashRunner;

impl Runner for BashRunner {
    fn run(&self, cmd: &str) -> Result<()> {
        info!("Running: {}", cmd);
        let status = Command::new("bash")
            .arg("-c")
            .arg(cmd)
            .status()
            .map_err(|e| Error::Spawn {
                command: cmd.to_string(),
                message: e.to_string(),
            })?;
        if !status.success() {
            return Err(Error::Command {
                command: cmd.to_string(),
                code: status.code(),
            });
        }
        Ok(())
    }
}

/// Logs commands instead of running them.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunner;

impl Runner for DryRunner {
    fn run(&self, cmd: &str) -> Result<()> {
        println!("{}", cmd);
        Ok(())
    }

    fn is_dry_run(&self) -> bool {
        true
    }
}

/// Replace every `{key}` in `template` with its value.
///
/// Unknown placeholders are left untouched.
///
/// ```
/// use icon::shell::format_cmd;
///
/// let cmd = format_cmd("git clone {url} {dir}", &[("url", "https://x/y.git"), ("dir", "/tmp/y")]);
/// assert_eq!(cmd, "git clone https://x/y.git /tmp/y");
/// ```
pub fn format_cmd(template: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(template.to_string(), |cmd, (key, value)| {
        cmd.replace(&format!("{{{}}}", key), value)
    })
}

/// Whether `cmd` can be found on `PATH` (or is an existing executable path).
pub fn exists_command(cmd: &str) -> bool {
    which::which(normalize_path(cmd)).is_ok()
}

/// Numeric id of the current user, via `id -u`.
fn current_uid() -> Option<u32> {
    let output = Command::new("id").arg("-u").output().ok()?;
    String::from_utf8_lossy(&output.stdout).trim().parse().ok()
}

/// The nearest existing ancestor of `path` (the path itself if it exists).
fn existing_ancestor(path: &Path) -> Option<PathBuf> {
    path.ancestors().find(|p| p.exists()).map(Path::to_path_buf)
}

/// Whether the current user can create files in, or write to, `path`.
///
/// Directories are probed by creating a temporary file inside them.
fn is_writable(path: &Path) -> bool {
    let Some(existing) = existing_ancestor(path) else {
        return false;
    };
    if existing.is_dir() {
        tempfile::tempfile_in(&existing).is_ok()
    } else {
        std::fs::OpenOptions::new().append(true).open(&existing).is_ok()
    }
}

/// Decide whether commands touching `paths` need to be prefixed with `sudo`.
///
/// Returns `""` for root or when every path is writable, and `"sudo"` when
/// `force_sudo` is set or some path is not writable. If `sudo` itself is not
/// installed the prefix is always empty and the command is left to fail on its
/// own.
pub fn command_prefix<P: AsRef<Path>>(force_sudo: bool, paths: &[P]) -> &'static str {
    if !cfg!(unix) || current_uid() == Some(0) {
        return "";
    }
    let needs_sudo = force_sudo
        || paths
            .iter()
            .any(|p| !is_writable(&normalize_path(&p.as_ref().to_string_lossy())));
    if needs_sudo && exists_command("sudo") {
        "sudo"
    } else {
        ""
    }
}

/// Test doubles shared by the library's unit tests.
#[cfg(test)]
pub(crate) mod testing {
    use super::Runner;
    use crate::error::Result;
    use std::cell::RefCell;
    use std::path::Path;

    /// Records commands instead of running them.
    #[derive(Default)]
    pub struct RecordingRunner {
        commands: RefCell<Vec<String>>,
        dry_run: bool,
    }

    impl RecordingRunner {
        /// A recorder that reports itself as a dry run.
        pub fn dry_run() -> Self {
            Self {
                dry_run: true,
                ..Self::default()
            }
        }

        pub fn commands(&self) -> Vec<String> {
            self.commands.borrow().clone()
        }
    }

    impl Runner for RecordingRunner {
        fn run(&self, cmd: &str) -> Result<()> {
            self.commands.borrow_mut().push(cmd.to_string());
            Ok(())
        }

        fn is_dry_run(&self) -> bool {
            self.dry_run
        }
    }

    /// Run `f` with `$HOME` pointing at a fresh temporary directory.
    ///
    /// Callers must be `#[serial]`.
    pub fn with_home<F: FnOnce(&Path)>(f: F) {
        let temp = tempfile::TempDir::new().unwrap();
        let old = std::env::var_os("HOME");
        std::env::set_var("HOME", temp.path());
        f(temp.path());
        match old {
            Some(home) => std::env::set_var("HOME", home),
            None => std::env::remove_var("HOME"),
        }
    }
}
