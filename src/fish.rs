//! # fish Shell Support
//!
//! The fish configuration repository lists, in
//! `~/.config/fish/completions/commands.yaml`, the shell command that prints
//! each tool's fish completion:
//!
//! ```yaml
//! rg: rg --generate complete-fish
//! zoxide: zoxide init fish
//! ```
//!
//! [`generate_completions`] writes `<command>.fish` for every listed tool
//! that is installed.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::error::{Error, Result};
use crate::os::{self, Series};
use crate::shell::{command_prefix, exists_command, format_cmd, Runner};

/// Repository cloned into `~/.config/fish`.
pub const CONFIG_REPO: &str = "https://github.com/legendu-net/fish";

/// Package manager command installing (`install == true`) or removing fish.
pub fn package_command(install: bool) -> Result<String> {
    if os::is_macos() {
        let verb = if install { "install" } else { "uninstall" };
        return Ok(format!("brew {} fish", verb));
    }
    let series = Series::current();
    let manager = if series.is_debian_ubuntu() {
        "apt-get"
    } else if series == Series::Fedora {
        "dnf"
    } else {
        return Err(Error::UnsupportedPlatform {
            feature: format!("Package management for fish ({})", os::dist_id()),
        });
    };
    let prefix = command_prefix::<&Path>(true, &[]);
    let verb = if install { "install" } else { "remove" };
    Ok(format_cmd(
        "{prefix} {manager} {verb} -y fish",
        &[("prefix", prefix), ("manager", manager), ("verb", verb)],
    )
    .trim()
    .to_string())
}

/// Read `commands.yaml`: command name to completion-generating command.
///
/// An empty file lists nothing.
pub fn read_completion_commands(path: &Path) -> Result<BTreeMap<String, String>> {
    let text = fs::read_to_string(path)?;
    if text.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    Ok(serde_yaml::from_str(&text)?)
}

/// Generate `<command>.fish` in `dir` for every installed command listed in
/// `dir/commands.yaml`.
///
/// Returns the commands completions were generated for.
pub fn generate_completions(runner: &dyn Runner, dir: &Path) -> Result<Vec<String>> {
    let list = dir.join("commands.yaml");
    if !list.is_file() {
        info!("{} not found, no completions to generate", list.display());
        return Ok(Vec::new());
    }
    let mut generated = Vec::new();
    for (command, completion) in read_completion_commands(&list)? {
        if !exists_command(&command) {
            debug!("{} is not installed, skipping its completion", command);
            continue;
        }
        let script = dir.join(format!("{}.fish", command));
        runner.run(&format!("{} > {}", completion, script.display()))?;
        generated.push(command);
    }
    Ok(generated)
}
