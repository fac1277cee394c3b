//! # CLI Command Implementations
//!
//! Each subcommand of `icon` lives in its own file with an `Args` struct
//! derived with `clap` and an `execute` function. Installer commands share
//! [`InstallArgs`] and receive the [`Context`](crate::cli::Context) holding
//! the command runner, so `--dry-run` applies to all of them.

use clap::Args;
use log::warn;

pub mod atuin;
pub mod bash_it;
pub mod completion;
pub mod data;
pub mod fish;
pub mod ldc;
pub mod update;
pub mod version;
pub mod zoxide;

/// Actions shared by the installer subcommands
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct InstallArgs {
    /// If specified, install the tool
    #[arg(short, long)]
    pub install: bool,

    /// If specified, configure the tool
    #[arg(short, long)]
    pub config: bool,

    /// If specified, uninstall the tool
    #[arg(long)]
    pub uninstall: bool,
}

impl InstallArgs {
    /// Warn when no action flag was given; returns whether anything is to be done.
    pub fn any(&self, tool: &str) -> bool {
        let any = self.install || self.config || self.uninstall;
        if !any {
            warn!(
                "Nothing to do for {}: pass --install, --config or --uninstall",
                tool
            );
        }
        any
    }
}
