//! # Version Command Implementation

use anyhow::Result;
use clap::Args;

use icon::{os, version};

/// Show the version of icon
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Also show the detected platform
    #[arg(long)]
    pub verbose: bool,
}

/// Execute the `version` command.
pub fn execute(args: VersionArgs) -> Result<()> {
    println!("{}", version::current());
    if args.verbose {
        let dist = os::dist_id();
        println!(
            "{}/{}{}",
            std::env::consts::OS,
            os::kernel_arch(),
            if dist.is_empty() {
                String::new()
            } else {
                format!(" ({})", dist)
            }
        );
    }
    Ok(())
}
