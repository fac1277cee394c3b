//! # Version Checking
//!
//! `icon update --check` compares the running version with the newest release
//! tag of the icon repository. Tags are read with `git ls-remote --tags`, so
//! no GitHub API token is needed and any git credential setup applies.
//!
//! Only tags that parse as semantic versions (optionally prefixed with `v`)
//! are considered; everything else is ignored.

use std::process::Command;

use log::warn;
use semver::Version;

use crate::error::{Error, Result};

/// Repository whose tags mark icon releases.
pub const REPO_URL: &str = "https://github.com/legendu-net/icon.git";

/// The version of the running binary.
pub fn current() -> Version {
    Version::parse(env!("CARGO_PKG_VERSION")).unwrap_or_else(|_| Version::new(0, 0, 0))
}

/// Extract tag names from `git ls-remote --tags` output.
///
/// Peeled entries (`refs/tags/v1.0.0^{}`) are folded into their tag.
pub fn parse_ls_remote(stdout: &str) -> Vec<String> {
    let mut tags: Vec<String> = stdout
        .lines()
        .filter_map(|line| {
            // Git ls-remote output format: <hash>\t<ref>
            let (_, ref_name) = line.split_once('\t')?;
            let tag = ref_name.strip_prefix("refs/tags/")?;
            Some(tag.trim_end_matches("^{}").to_string())
        })
        .collect();
    tags.dedup();
    tags
}

/// List all tags of a remote repository.
pub fn list_tags(url: &str) -> Result<Vec<String>> {
    let command = format!("git ls-remote --tags {}", url);
    let output = Command::new("git")
        .args(["ls-remote", "--tags", url])
        .output()
        .map_err(|e| Error::Spawn {
            command: command.clone(),
            message: e.to_string(),
        })?;

    if !output.status.success() {
        warn!("{}", String::from_utf8_lossy(&output.stderr).trim());
        return Err(Error::Command {
            command,
            code: output.status.code(),
        });
    }

    Ok(parse_ls_remote(&String::from_utf8_lossy(&output.stdout)))
}

/// Parse a tag string into a semantic version.
pub fn parse_semver_tag(tag: &str) -> Option<Version> {
    Version::parse(tag.strip_prefix('v').unwrap_or(tag)).ok()
}

/// The greatest semantic version among `tags`.
pub fn find_latest_version(tags: &[String]) -> Option<Version> {
    tags.iter().filter_map(|t| parse_semver_tag(t)).max()
}

/// The newest released version of icon.
pub fn latest(url: &str) -> Result<Option<Version>> {
    Ok(find_latest_version(&list_tags(url)?))
}

/// Whether `latest` is newer than `current`.
pub fn needs_update(current: &Version, latest: &Version) -> bool {
    latest > current
}

#[cfg(test)]
mod tests {
    use super::*;

    const LS_REMOTE: &str = "\
1111111111111111111111111111111111111111\trefs/tags/v0.31.0
2222222222222222222222222222222222222222\trefs/tags/v0.32.1
3333333333333333333333333333333333333333\trefs/tags/v0.32.1^{}
4444444444444444444444444444444444444444\trefs/tags/nightly
";

    #[test]
    fn test_parse_ls_remote() {
        assert_eq!(
            parse_ls_remote(LS_REMOTE),
            vec!["v0.31.0", "v0.32.1", "nightly"]
        );
    }

    #[test]
    fn test_parse_ls_remote_ignores_noise() {
        assert!(parse_ls_remote("warning: redirecting\n").is_empty());
        assert!(parse_ls_remote("abc\trefs/heads/main\n").is_empty());
    }

    #[test]
    fn test_parse_semver_tag() {
        assert_eq!(parse_semver_tag("v1.0.0"), Some(Version::new(1, 0, 0)));
        assert_eq!(parse_semver_tag("1.0.0"), Some(Version::new(1, 0, 0)));
        assert_eq!(parse_semver_tag("invalid"), None);
    }

    #[test]
    fn test_find_latest_version() {
        let tags = parse_ls_remote(LS_REMOTE);
        assert_eq!(find_latest_version(&tags), Some(Version::new(0, 32, 1)));
        assert_eq!(find_latest_version(&["nightly".to_string()]), None);
    }

    #[test]
    fn test_needs_update() {
        let current = Version::new(0, 32, 1);
        assert!(needs_update(&current, &Version::new(0, 33, 0)));
        assert!(!needs_update(&current, &Version::new(0, 32, 1)));
        assert!(!needs_update(&current, &Version::new(0, 31, 9)));
    }

    #[test]
    fn test_current_matches_package() {
        assert_eq!(current().to_string(), env!("CARGO_PKG_VERSION"));
    }
}
