//! # zoxide Command Implementation

use anyhow::{Context as _, Result};

use icon::bash::{bash_config_file, config_bash};
use icon::fs::{append_to_text_file, home_dir};
use icon::output::Status;

use crate::cli::Context;
use crate::commands::InstallArgs;

const INSTALL: &str =
    "curl -sS https://raw.githubusercontent.com/ajeetdsouza/zoxide/main/install.sh | bash";

/// Execute the `zoxide` command.
pub fn execute(args: InstallArgs, ctx: &Context) -> Result<()> {
    if !args.any("zoxide") {
        return Ok(());
    }

    if args.install {
        ctx.runner.run(INSTALL).context("Failed to install zoxide")?;
        ctx.output.print(Status::Done, "zoxide has been installed");
    }

    if args.config {
        config_bash()?;
        append_to_text_file(
            &bash_config_file()?,
            "\neval \"$(zoxide init bash)\"\n",
            true,
        )?;
        ctx.output.print(Status::Done, "zoxide has been configured");
    }

    if args.uninstall {
        // the upstream installer puts the binary into ~/.local/bin
        let binary = home_dir()?.join(".local/bin/zoxide");
        ctx.runner
            .run(&format!("rm -f {}", binary.display()))
            .context("Failed to uninstall zoxide")?;
        ctx.output.print(Status::Done, "zoxide has been uninstalled");
    }
    Ok(())
}
