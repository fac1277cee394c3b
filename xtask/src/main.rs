//! Development automation tasks for icon.
//!
//! This crate provides `cargo xtask` commands for development chores that
//! need to run the freshly built `icon` binary or third-party tools.
//!
//! # Usage
//!
//! ```bash
//! cargo xtask completions                     # Build icon and regenerate completion scripts
//! cargo xtask completions --generator docker  # Run completely from its container image
//! cargo xtask completions --dry-run           # Print the steps without running them
//! ```

mod completions;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::env;
use std::path::PathBuf;
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development automation tasks for icon")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build icon and regenerate the bash and fish completion scripts
    Completions {
        /// Completion generator for ldc (auto, docker, or local)
        #[arg(long, short, default_value = "auto")]
        generator: String,
        /// Reuse the existing release binary instead of building it
        #[arg(long)]
        skip_build: bool,
        /// Print each step's command line without running it
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Find workspace root
    let workspace_root = workspace_root()?;
    env::set_current_dir(&workspace_root).with_context(|| {
        format!(
            "Failed to change to workspace root: {}",
            workspace_root.display()
        )
    })?;

    match cli.command {
        Commands::Completions {
            generator,
            skip_build,
            dry_run,
        } => run_completions(workspace_root, &generator, skip_build, dry_run),
    }
}

/// Find the workspace root directory.
fn workspace_root() -> Result<PathBuf> {
    let output = Command::new("cargo")
        .args(["locate-project", "--workspace", "--message-format=plain"])
        .output()
        .context("Failed to run 'cargo locate-project'")?;

    if !output.status.success() {
        bail!("Failed to locate workspace root");
    }

    let path = String::from_utf8(output.stdout).context("Invalid UTF-8 in cargo output")?;
    let path = PathBuf::from(path.trim());

    // The output is Cargo.toml path, we need the directory
    path.parent()
        .map(|p| p.to_path_buf())
        .context("Failed to get parent directory of Cargo.toml")
}

/// Build icon and generate completion scripts for it and for ldc.
fn run_completions(
    workspace_root: PathBuf,
    generator: &str,
    skip_build: bool,
    dry_run: bool,
) -> Result<()> {
    let generator = generator
        .parse::<completions::Generator>()
        .map_err(|e| anyhow::anyhow!(e))?;

    let config = completions::CompletionsConfig {
        workspace_root,
        generator,
        skip_build,
    };

    if dry_run {
        completions::run(&config, &mut completions::PrintRunner)
    } else {
        completions::run(&config, &mut completions::ProcessRunner)
    }
}
