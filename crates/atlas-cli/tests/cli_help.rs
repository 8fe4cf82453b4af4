use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("atlas")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("signup"))
        .stdout(predicate::str::contains("logout"))
        .stdout(predicate::str::contains("whoami"))
        .stdout(predicate::str::contains("jobs"));
}

#[test]
fn test_jobs_help_shows_subcommands() {
    cargo_bin_cmd!("atlas")
        .args(["jobs", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("created"))
        .stdout(predicate::str::contains("applied"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("apply"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("atlas")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1"));
}
