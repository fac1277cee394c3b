//! # Data Command Implementation

use anyhow::{Context as _, Result};
use clap::Args;

use icon::data::{fetch_config_data, GIT_URL};
use icon::output::Status;

use crate::cli::Context;

/// Pull data for icon from GitHub into ~/.config/icon-data
#[derive(Args, Debug)]
pub struct DataArgs {
    /// The Git repo URL for icon-data.
    #[arg(short, long, env = "ICON_DATA_GIT_URL", default_value = GIT_URL)]
    pub git_url: String,

    /// Force pulling data if it already exists.
    #[arg(long)]
    pub force: bool,
}

/// Execute the `data` command.
pub fn execute(args: DataArgs, ctx: &Context) -> Result<()> {
    let dir = fetch_config_data(ctx.runner.as_ref(), args.force, Some(&args.git_url))
        .context("Failed to fetch icon-data")?;
    ctx.output
        .print(Status::Done, &format!("icon-data is ready in {}", dir.display()));
    Ok(())
}
