//! Integration tests for the `cmdset-demo` binary entry point.
//!
//! Verifies exit codes and the split between stdout and stderr for each kind
//! of completion.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

#[test]
fn greets_by_name() {
    let mut command = cargo_bin_cmd!("cmdset-demo");
    command.args(["hello", "Grace"]);
    command.assert().success().stdout("Hello, Grace!\n");
}

#[test]
fn leading_configuration_flags_are_not_command_arguments() {
    let mut command = cargo_bin_cmd!("cmdset-demo");
    command.args(["--log-format", "json", "--help-width=40", "add", "20", "22"]);
    command.assert().success().stdout("42\n");
}

#[test]
fn missing_command_is_a_usage_error() {
    let mut command = cargo_bin_cmd!("cmdset-demo");
    command
        .assert()
        .code(2)
        .stderr(contains("missing command argument").and(contains("--help' for usage")));
}

#[test]
fn unknown_command_is_a_usage_error() {
    let mut command = cargo_bin_cmd!("cmdset-demo");
    command.arg("deploy");
    command
        .assert()
        .code(2)
        .stderr(contains("unrecognized command 'deploy'"));
}

#[test]
fn command_failures_exit_with_one() {
    let mut command = cargo_bin_cmd!("cmdset-demo");
    command.args(["add", "9223372036854775807", "9223372036854775807"]);
    command
        .assert()
        .code(1)
        .stderr(contains("overflows").and(contains("for usage").not()));
}

#[test]
fn clean_reads_confirmation_from_stdin() {
    let mut command = cargo_bin_cmd!("cmdset-demo");
    command.arg("clean").write_stdin("no\n");
    command
        .assert()
        .success()
        .stdout("Clean cancelled.\n")
        .stderr(contains("Remove build artefacts? [y/n]"));
}

#[test]
fn forced_clean_does_not_prompt() {
    let mut command = cargo_bin_cmd!("cmdset-demo");
    command.args(["clean", "--force"]);
    command
        .assert()
        .success()
        .stdout("Removed build artefacts.\n")
        .stderr(contains("[y/n]").not());
}

#[test]
fn help_goes_to_stdout() {
    let mut command = cargo_bin_cmd!("cmdset-demo");
    command.arg("--help");
    command
        .assert()
        .success()
        .stdout(contains("hello [name]").and(contains("clean [--force]")));
}
