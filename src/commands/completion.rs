//! # Completion Command Implementation
//!
//! This module implements the `completion` subcommand, which prints a shell
//! completion script for `icon` generated with `clap_complete`. The release
//! workflow (`cargo xtask completions`) runs it to refresh the scripts under
//! `data/`, and the shell installers write the same scripts into place.
//!
//! ## Example
//!
//! ```bash
//! # Bash
//! icon completion bash > /etc/bash_completion.d/icon
//!
//! # Zsh
//! icon completion zsh > "${fpath[1]}/_icon"
//!
//! # Fish
//! icon completion fish > ~/.config/fish/completions/icon.fish
//! ```

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, ValueEnum};
use clap_complete::{generate, Shell};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::cli::Cli;

/// Shell types for completion generation
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CompletionShell {
    /// Bourne Again Shell
    Bash,
    /// Z Shell
    Zsh,
    /// Fish Shell
    Fish,
    /// PowerShell
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish Shell
    Elvish,
}

impl From<CompletionShell> for Shell {
    fn from(shell: CompletionShell) -> Self {
        match shell {
            CompletionShell::Bash => Shell::Bash,
            CompletionShell::Zsh => Shell::Zsh,
            CompletionShell::Fish => Shell::Fish,
            CompletionShell::PowerShell => Shell::PowerShell,
            CompletionShell::Elvish => Shell::Elvish,
        }
    }
}

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: CompletionShell,
}

/// Write the completion script for `shell` to `out`.
pub fn write_completion(shell: CompletionShell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    generate(Shell::from(shell), &mut cmd, "icon", out);
}

/// Write the completion script for `shell` to a file, creating parent directories.
pub fn install_completion(shell: CompletionShell, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let mut script = Vec::new();
    write_completion(shell, &mut script);
    fs::write(path, script).with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Completion script for icon written to {}", path.display());
    Ok(())
}

/// Execute the `completion` command.
///
/// The script goes to stdout so it can be redirected wherever the shell
/// expects it.
pub fn execute(args: CompletionArgs) -> Result<()> {
    write_completion(args.shell, &mut io::stdout());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_install_completion_creates_parents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("completions/icon.fish");
        install_completion(CompletionShell::Fish, &path).unwrap();
        let script = fs::read_to_string(&path).unwrap();
        assert!(script.contains("complete -c icon"));
        assert!(script.contains("bash_it"));
    }

    #[test]
    fn test_bash_completion_mentions_subcommands() {
        let mut script = Vec::new();
        write_completion(CompletionShell::Bash, &mut script);
        let script = String::from_utf8(script).unwrap();
        assert!(script.contains("_icon()"));
        assert!(script.contains("ldc"));
        assert!(script.contains("zoxide"));
    }
}
