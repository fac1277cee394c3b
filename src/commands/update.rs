//! # Update Command Implementation
//!
//! This module implements the `update` subcommand, which reinstalls icon with
//! the upstream install script.
//!
//! - By default the binary is replaced in the directory of the running
//!   `icon`; `--install-dir` picks another directory. `sudo` is used when that
//!   directory is not writable.
//! - `--check` only compares the running version with the newest release tag
//!   and reports whether an update is available.

use anyhow::{Context as _, Result};
use clap::Args;
use std::path::PathBuf;

use icon::output::Status;
use icon::shell::{command_prefix, format_cmd};
use icon::version;

use crate::cli::Context;

/// The install script for icon.
const INSTALL_SCRIPT: &str = "https://raw.githubusercontent.com/legendu-net/icon/main/install_icon.sh";

/// Update icon
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// The directory for installing icon.
    #[arg(short = 'd', long, value_name = "DIR")]
    pub install_dir: Option<PathBuf>,

    /// Only check whether a newer release exists.
    #[arg(long)]
    pub check: bool,
}

/// Directory holding the running executable.
fn current_install_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to locate the running icon binary")?;
    exe.parent()
        .map(|p| p.to_path_buf())
        .context("Failed to get the directory of the icon binary")
}

/// Execute the `update` command.
pub fn execute(args: UpdateArgs, ctx: &Context) -> Result<()> {
    if args.check {
        let current = version::current();
        match version::latest(version::REPO_URL)? {
            Some(latest) if version::needs_update(&current, &latest) => ctx.output.print(
                Status::Info,
                &format!("icon {} is available (installed: {})", latest, current),
            ),
            _ => ctx.output.print(
                Status::Done,
                &format!("icon {} is up to date", current),
            ),
        }
        return Ok(());
    }

    let dir = match args.install_dir {
        Some(dir) => dir,
        None => current_install_dir()?,
    };
    let dir_str = dir.display().to_string();
    let shell = format!("{} bash", command_prefix(false, &[&dir]));
    let cmd = format_cmd(
        "curl -sSL {script} | {shell} -s -- -d {dir}",
        &[
            ("script", INSTALL_SCRIPT),
            ("shell", shell.trim_start()),
            ("dir", &dir_str),
        ],
    );
    ctx.runner
        .run(&cmd)
        .context("Failed to update icon")?;
    ctx.output
        .print(Status::Done, &format!("icon has been updated in {}", dir.display()));
    Ok(())
}
