//! # Filesystem Helpers
//!
//! Small utilities for editing dotfiles and linking configuration into place.
//! Paths accepted from users and hard-coded defaults may start with `~`,
//! which [`normalize_path`] expands to the home directory.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::{Error, Result};
use crate::shell::{command_prefix, format_cmd, Runner};

/// The current user's home directory.
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or(Error::HomeDir)
}

/// Expand a leading `~` to the home directory.
///
/// The path is returned unchanged if it does not start with `~` or no home
/// directory is known.
pub fn normalize_path(path: &str) -> PathBuf {
    let home = match dirs::home_dir() {
        Some(home) => home,
        None => return PathBuf::from(path),
    };
    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}

/// Append `text` to the file at `path`, creating it if needed.
///
/// With `check_existence`, nothing is written when the file already contains
/// the trimmed text, so repeated configuration runs stay idempotent.
pub fn append_to_text_file(path: &Path, text: &str, check_existence: bool) -> Result<()> {
    if check_existence && path.is_file() {
        let content = fs::read_to_string(path)?;
        if content.contains(text.trim()) {
            return Ok(());
        }
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(text.as_bytes())?;
    Ok(())
}

/// Replace all occurrences of `pattern` with `repl` in a text file.
pub fn replace_pattern(path: &Path, pattern: &str, repl: &str) -> Result<()> {
    let text = fs::read_to_string(path)?;
    fs::write(path, text.replace(pattern, repl))?;
    Ok(())
}

/// Backup location for `path`: the path with an RFC 3339 timestamp appended.
fn backup_path(path: &Path) -> PathBuf {
    let stamp = chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, false);
    let mut name = path.as_os_str().to_os_string();
    name.push("_");
    name.push(stamp);
    PathBuf::from(name)
}

/// Move an existing file or directory out of the way.
///
/// Returns the backup location, or `None` if there was nothing to back up.
/// With a dry-run runner the move is only printed.
pub fn backup(runner: &dyn Runner, path: &Path) -> Result<Option<PathBuf>> {
    if fs::symlink_metadata(path).is_err() {
        return Ok(None);
    }
    let target = backup_path(path);
    if runner.is_dry_run() {
        runner.run(&format!("mv {} {}", path.display(), target.display()))?;
        return Ok(Some(target));
    }
    fs::rename(path, &target)?;
    info!("{} has been backed up to {}", path.display(), target.display());
    Ok(Some(target))
}

/// Remove a file, symlink or directory tree if present.
///
/// With a dry-run runner the removal is only printed.
pub fn remove_all(runner: &dyn Runner, path: &Path) -> Result<()> {
    let Ok(meta) = fs::symlink_metadata(path) else {
        return Ok(());
    };
    if runner.is_dry_run() {
        return runner.run(&format!("rm -rf {}", path.display()));
    }
    if meta.is_dir() {
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_file(path)?;
    }
    Ok(())
}

/// Link (or copy) `src` to `dst`.
///
/// An existing `dst` is backed up when `backup` is set and removed
/// otherwise. Linking and copying go through the runner with `sudo` when the
/// destination is not writable.
pub fn symlink(runner: &dyn Runner, src: &Path, dst: &Path, backup: bool, copy: bool) -> Result<()> {
    if backup {
        self::backup(runner, dst)?;
    } else {
        remove_all(runner, dst)?;
    }
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    let prefix = command_prefix(false, &[dst]);
    let template = if copy {
        "{prefix} cp -r {src} {dst}"
    } else {
        "{prefix} ln -sv {src} {dst}"
    };
    let src = src.display().to_string();
    let dst = dst.display().to_string();
    let cmd = format_cmd(template, &[("prefix", prefix), ("src", &src), ("dst", &dst)]);
    runner.run(cmd.trim())
}
