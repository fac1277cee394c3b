//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use icon::output::OutputConfig;
use icon::shell::{BashRunner, DryRunner, Runner};

use crate::commands;

/// icon - Install and configure tools.
#[derive(Parser, Debug)]
#[command(name = "icon")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        env = "ICON_LOG",
        default_value = "info"
    )]
    log_level: String,

    /// Print external commands instead of running them
    #[arg(long, global = true)]
    dry_run: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completion scripts
    Completion(commands::completion::CompletionArgs),

    /// Show the version of icon
    #[command(visible_alias = "v")]
    Version(commands::version::VersionArgs),

    /// Update icon
    #[command(visible_alias = "upd")]
    Update(commands::update::UpdateArgs),

    /// Pull data for icon from GitHub into ~/.config/icon-data
    #[command(visible_alias = "d")]
    Data(commands::data::DataArgs),

    /// Install and configure bash-it
    #[command(name = "bash_it", visible_aliases = ["bashit", "bit"])]
    BashIt(commands::bash_it::BashItArgs),

    /// Install and configure zoxide
    Zoxide(commands::InstallArgs),

    /// Install and configure atuin
    Atuin(commands::InstallArgs),

    /// Install and configure the fish shell
    Fish(commands::InstallArgs),

    /// Launch a container of a Docker image
    Ldc(commands::ldc::LdcArgs),
}

/// Shared state handed to every command.
pub struct Context {
    pub runner: Box<dyn Runner>,
    pub output: OutputConfig,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::new()
            .parse_filters(&self.log_level)
            .format_timestamp(None)
            .format_target(false)
            .init();

        let runner: Box<dyn Runner> = if self.dry_run {
            Box::new(DryRunner)
        } else {
            Box::new(BashRunner)
        };
        let ctx = Context {
            runner,
            output: OutputConfig::from_env_and_flag(&self.color),
        };

        match self.command {
            Commands::Completion(args) => commands::completion::execute(args),
            Commands::Version(args) => commands::version::execute(args),
            Commands::Update(args) => commands::update::execute(args, &ctx),
            Commands::Data(args) => commands::data::execute(args, &ctx),
            Commands::BashIt(args) => commands::bash_it::execute(args, &ctx),
            Commands::Zoxide(args) => commands::zoxide::execute(args, &ctx),
            Commands::Atuin(args) => commands::atuin::execute(args, &ctx),
            Commands::Fish(args) => commands::fish::execute(args, &ctx),
            Commands::Ldc(args) => commands::ldc::execute(args, &ctx),
        }
    }
}
