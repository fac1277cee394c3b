//! # fish Command Implementation
//!
//! - `--install` uses Homebrew on macOS and apt or dnf on Linux.
//! - `--config` replaces `~/.config/fish` (backing up the old one) with the
//!   fish configuration repository, generates the completion scripts listed
//!   in its `completions/commands.yaml`, and writes icon's own `icon.fish`.

use anyhow::{Context as _, Result};

use icon::fish::{generate_completions, package_command, CONFIG_REPO};
use icon::fs::{backup, home_dir};
use icon::output::Status;

use crate::cli::Context;
use crate::commands::completion::{install_completion, CompletionShell};
use crate::commands::InstallArgs;

/// Execute the `fish` command.
pub fn execute(args: InstallArgs, ctx: &Context) -> Result<()> {
    if !args.any("fish") {
        return Ok(());
    }

    if args.install {
        ctx.runner
            .run(&package_command(true)?)
            .context("Failed to install fish")?;
        ctx.output.print(Status::Done, "fish has been installed");
    }

    if args.config {
        let dir = home_dir()?.join(".config/fish");
        backup(ctx.runner.as_ref(), &dir)?;
        ctx.runner
            .run(&format!("git clone {} {}", CONFIG_REPO, dir.display()))
            .context("Failed to clone the fish configuration")?;
        let completions = dir.join("completions");
        let generated = generate_completions(ctx.runner.as_ref(), &completions)
            .with_context(|| format!("Failed to generate completions in {}", completions.display()))?;
        install_completion(CompletionShell::Fish, &completions.join("icon.fish"))?;
        ctx.output.print(
            Status::Done,
            &format!(
                "fish has been configured ({} completion scripts generated)",
                generated.len() + 1
            ),
        );
    }

    if args.uninstall {
        ctx.runner
            .run(&package_command(false)?)
            .context("Failed to uninstall fish")?;
        ctx.output.print(Status::Done, "fish has been uninstalled");
    }
    Ok(())
}
