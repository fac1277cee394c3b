//! # icon-data
//!
//! Dotfiles and tool configurations live in a separate git repository,
//! `icon-data`, cloned into `~/.config/icon-data`. Configuration steps of the
//! installers symlink files from there into place.

use std::path::PathBuf;

use log::info;

use crate::error::Result;
use crate::fs::{backup, home_dir};
use crate::shell::{format_cmd, Runner};

/// Default repository for icon-data.
pub const GIT_URL: &str = "https://github.com/legendu-net/icon-data.git";

/// Location of the icon-data checkout.
pub fn data_dir() -> Result<PathBuf> {
    Ok(home_dir()?.join(".config/icon-data"))
}

/// Clone icon-data (with submodules) into [`data_dir`].
///
/// An existing checkout is reused unless `force` is set, in which case it is
/// backed up first. `git_url` defaults to [`GIT_URL`].
pub fn fetch_config_data(runner: &dyn Runner, force: bool, git_url: Option<&str>) -> Result<PathBuf> {
    let dir = data_dir()?;
    if !force && dir.join(".git").is_dir() {
        info!("Using existing data in {}.", dir.display());
        return Ok(dir);
    }

    backup(runner, &dir)?;
    if let Some(parent) = dir.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let dir_str = dir.display().to_string();
    let cmd = format_cmd(
        "git clone {url} {dir} && cd {dir} && git submodule init && git submodule update --remote",
        &[("url", git_url.unwrap_or(GIT_URL)), ("dir", &dir_str)],
    );
    runner.run(&cmd)?;
    info!("Data for icon has been pulled into {}.", dir.display());
    Ok(dir)
}
