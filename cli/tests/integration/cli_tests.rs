//! Top-level CLI behavior: help, version, argument errors.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn coder() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("coder"))
}

#[test]
fn test_no_args_prints_usage_and_fails() {
    coder()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_version_flag_prints_version() {
    coder()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_lists_config_ssh() {
    coder()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("config-ssh"))
        .stdout(predicate::str::contains("--global-config"));
}

#[test]
fn test_unknown_subcommand_fails() {
    coder().arg("bogus").assert().failure();
}
