//! # ldc Command Implementation
//!
//! Launches a Docker container. See [`icon::docker`] for how the command
//! line is assembled. With the global `--dry-run` flag the command is only
//! printed.

use anyhow::{Context as _, Result};
use clap::Args;
use log::info;

use icon::docker::{ldc_command, DockerUser, LdcOptions, Limits};
use icon::fs::home_dir;
use icon::os;

use crate::cli::Context;

/// Launch a container of a Docker image
#[derive(Args, Debug)]
pub struct LdcArgs {
    /// Image name (image_name[:tag]) followed by an optional command
    #[arg(required = true, value_name = "IMAGE [COMMAND]...", trailing_var_arg = true)]
    pub args: Vec<String>,

    /// Run container in background and print container ID.
    #[arg(short, long)]
    pub detach: bool,

    /// The port on the Docker host to forward to the port inside the Docker container.
    #[arg(short, long)]
    pub port: Option<u16>,

    /// The user to create in the Docker container.
    #[arg(short, long)]
    pub user: Option<String>,

    /// The default password for the user (to create in the Docker container).
    #[arg(short = 'P', long)]
    pub password: Option<String>,

    /// Extra port mappings (host:container).
    #[arg(long, value_delimiter = ',')]
    pub extra_port_mappings: Vec<String>,

    /// Mount /home on the host as /home_host in the Docker container.
    #[arg(short, long)]
    pub mount_home: bool,
}

/// Execute the `ldc` command.
pub fn execute(args: LdcArgs, ctx: &Context) -> Result<()> {
    let user = DockerUser::current(args.user, args.password)
        .context("Failed to determine the current user")?;
    let home_parent = if args.mount_home {
        home_dir()?.parent().map(|p| p.to_path_buf())
    } else {
        None
    };
    let limits = if os::is_linux() {
        os::mem_total_bytes().map(|mem| Limits::from_host(mem, os::cpu_count()))
    } else {
        None
    };

    let options = LdcOptions {
        args: args.args,
        user,
        workdir: std::env::current_dir().context("Failed to get the working directory")?,
        home_parent,
        detach: args.detach,
        port: args.port,
        extra_port_mappings: args.extra_port_mappings,
        limits,
    };
    let command = ldc_command(&options).join(" ");
    info!("Launching Docker container using the following command:\n\n{}\n", command);
    ctx.runner
        .run(&command)
        .context("Failed to launch the Docker container")?;
    Ok(())
}
