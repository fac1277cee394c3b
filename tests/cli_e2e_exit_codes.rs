//! End-to-end tests for CLI exit codes.
//!
//! - Exit code 0: Success
//! - Exit code 1: A command failed (for example an external process)
//! - Exit code 2: Invalid command-line usage (handled by clap)

#[allow(dead_code)]
mod common;
use common::prelude::*;

/// Exit code 0 is returned for --help.
#[test]
fn test_exit_code_help() {
    let mut cmd = cargo_bin_cmd!("icon");
    cmd.arg("--help").assert().code(0);
}

/// Exit code 0 is returned for --version.
#[test]
fn test_exit_code_version() {
    let mut cmd = cargo_bin_cmd!("icon");
    cmd.arg("--version").assert().code(0);
}

/// Exit code 2 is returned for an unknown subcommand.
#[test]
fn test_exit_code_unknown_subcommand() {
    let mut cmd = cargo_bin_cmd!("icon");
    cmd.arg("not-a-command").assert().code(2);
}

/// Exit code 2 is returned when ldc gets no image.
#[test]
fn test_exit_code_ldc_without_image() {
    let mut cmd = cargo_bin_cmd!("icon");
    cmd.arg("ldc")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("required"));
}

/// Exit code 1 is returned when an external command fails.
#[test]
fn test_exit_code_failed_external_command() {
    let home = TestHome::new();
    let missing_repo = home.path().join("no-such-repo.git");

    home.command()
        .args(["data", "--git-url"])
        .arg(&missing_repo)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to fetch icon-data"));
}
