//! # atuin Command Implementation
//!
//! atuin binds the up arrow by default; the configuration step switches that
//! off so the up arrow keeps walking bash's own history.

use anyhow::{Context as _, Result};

use icon::bash::{bash_config_file, config_bash};
use icon::fs::{append_to_text_file, home_dir, replace_pattern};
use icon::os;
use icon::output::Status;

use crate::cli::Context;
use crate::commands::InstallArgs;

const INSTALL: &str =
    "bash <(curl https://raw.githubusercontent.com/ellie/atuin/main/install.sh)";

const INIT: &str = "eval \"$(atuin init bash)\"";
const INIT_NO_UP_ARROW: &str = "eval \"$(atuin init bash --disable-up-arrow)\"";

/// Execute the `atuin` command.
pub fn execute(args: InstallArgs, ctx: &Context) -> Result<()> {
    if !args.any("atuin") {
        return Ok(());
    }

    if args.install {
        ctx.runner.run(INSTALL).context("Failed to install atuin")?;
        ctx.output.print(Status::Done, "atuin has been installed");
    }

    if args.config {
        config_bash()?;
        if os::is_macos() {
            let block = format!("\n[[ -f ~/.bash-preexec.sh ]] && source ~/.bash-preexec.sh\n{}\n", INIT_NO_UP_ARROW);
            append_to_text_file(&home_dir()?.join(".bash_profile"), &block, true)?;
        } else {
            let rc = bash_config_file()?;
            let text = std::fs::read_to_string(&rc).unwrap_or_default();
            if text.contains(INIT) {
                replace_pattern(&rc, INIT, INIT_NO_UP_ARROW)?;
            } else {
                append_to_text_file(&rc, &format!("\n{}\n", INIT_NO_UP_ARROW), true)?;
            }
        }
        ctx.output.print(Status::Done, "atuin has been configured");
    }

    if args.uninstall {
        ctx.output.print(
            Status::Skipped,
            "atuin has no uninstaller; remove the atuin binary and ~/.local/share/atuin manually",
        );
    }
    Ok(())
}
