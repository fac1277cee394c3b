//! # bash-it Command Implementation
//!
//! Installs [bash-it](https://github.com/Bash-it/bash-it), a community bash
//! framework, and configures it from `icon-data`:
//!
//! - `--install` clones bash-it into `~/.bash_it` and runs its installer.
//! - `--config` fetches icon-data, configures bash, links
//!   `~/.config/icon-data/bash-it` over `~/.bash_it`, and installs icon's own
//!   completion script into `~/.bash_it/completion/available/`.
//! - `--uninstall` runs bash-it's uninstaller and removes `~/.bash_it`.

use anyhow::{Context as _, Result};
use clap::Args;

use icon::bash::config_bash;
use icon::data::fetch_config_data;
use icon::fs::{home_dir, remove_all, symlink};
use icon::output::Status;
use icon::shell::format_cmd;

use crate::cli::Context;
use crate::commands::completion::{install_completion, CompletionShell};
use crate::commands::InstallArgs;

/// Install and configure bash-it
#[derive(Args, Debug)]
pub struct BashItArgs {
    #[command(flatten)]
    pub actions: InstallArgs,

    /// Do not backup existing configuration files.
    #[arg(long)]
    pub no_backup: bool,

    /// Make copies (instead of symbolic links) of configuration files.
    #[arg(long)]
    pub copy: bool,
}

/// Execute the `bash_it` command.
pub fn execute(args: BashItArgs, ctx: &Context) -> Result<()> {
    if !args.actions.any("bash-it") {
        return Ok(());
    }
    let home = home_dir()?;
    let bash_it_dir = home.join(".bash_it");
    let dir = bash_it_dir.display().to_string();

    if args.actions.install {
        remove_all(ctx.runner.as_ref(), &bash_it_dir)?;
        let cmd = format_cmd(
            "git clone --depth=1 https://github.com/Bash-it/bash-it.git {dir} && {dir}/install.sh --silent -f",
            &[("dir", &dir)],
        );
        ctx.runner.run(&cmd).context("Failed to install bash-it")?;
        ctx.output.print(Status::Done, "bash-it has been installed");
    }

    if args.actions.config {
        let data = fetch_config_data(ctx.runner.as_ref(), false, None)?;
        config_bash()?;
        symlink(
            ctx.runner.as_ref(),
            &data.join("bash-it"),
            &bash_it_dir,
            !args.no_backup,
            args.copy,
        )
        .context("Failed to link bash-it configuration")?;
        install_completion(
            CompletionShell::Bash,
            &bash_it_dir.join("completion/available/icon.completion.bash"),
        )?;
        ctx.output.print(Status::Done, "bash-it has been configured");
    }

    if args.actions.uninstall {
        let cmd = format_cmd("{dir}/uninstall.sh && rm -rf {dir}", &[("dir", &dir)]);
        ctx.runner.run(&cmd).context("Failed to uninstall bash-it")?;
        ctx.output.print(Status::Done, "bash-it has been uninstalled");
    }
    Ok(())
}
