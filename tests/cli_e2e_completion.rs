//! End-to-end tests for the `icon completion` command.
//!
//! These tests verify the CLI behavior of the `completion` command by invoking
//! the binary directly and checking its output.

#[allow(dead_code)]
mod common;
#[allow(unused_imports)]
use common::prelude::*;

#[test]
fn test_completion_help() {
    let mut cmd = cargo_bin_cmd!("icon");
    cmd.arg("completion")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generate shell completion scripts"))
        .stdout(predicate::str::contains("bash"))
        .stdout(predicate::str::contains("zsh"))
        .stdout(predicate::str::contains("fish"))
        .stdout(predicate::str::contains("powershell"))
        .stdout(predicate::str::contains("elvish"));
}

#[test]
fn test_completion_bash() {
    let mut cmd = cargo_bin_cmd!("icon");
    cmd.arg("completion")
        .arg("bash")
        .assert()
        .success()
        // Bash completions define a completion function for the binary
        .stdout(predicate::str::contains("_icon()"))
        .stdout(predicate::str::contains("complete -F _icon"))
        // and know about the subcommands and their aliases
        .stdout(predicate::str::contains("bash_it"))
        .stdout(predicate::str::contains("zoxide"))
        .stdout(predicate::str::contains("ldc"));
}

#[test]
fn test_completion_fish() {
    let mut cmd = cargo_bin_cmd!("icon");
    cmd.arg("completion")
        .arg("fish")
        .assert()
        .success()
        .stdout(predicate::str::contains("complete -c icon"))
        .stdout(predicate::str::contains("completion"))
        .stdout(predicate::str::contains("fish"));
}

#[test]
fn test_completion_zsh() {
    let mut cmd = cargo_bin_cmd!("icon");
    cmd.arg("completion")
        .arg("zsh")
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef icon"));
}

#[test]
fn test_completion_output_is_not_logged() {
    // stdout must contain only the script so it can be redirected to a file
    let mut cmd = cargo_bin_cmd!("icon");
    cmd.args(["--log-level", "debug", "completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("_icon()"));
}

#[test]
fn test_completion_invalid_shell() {
    let mut cmd = cargo_bin_cmd!("icon");
    cmd.arg("completion")
        .arg("invalid-shell")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_completion_missing_shell_argument() {
    let mut cmd = cargo_bin_cmd!("icon");
    cmd.arg("completion")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}
