use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_config_path_command() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("atlas")
        .env("ATLAS_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_creates_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    assert!(!config_path.exists());

    cargo_bin_cmd!("atlas")
        .env("ATLAS_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config at"));

    assert!(config_path.exists());

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("log_level ="));
    assert!(contents.contains("base_url ="));
}

#[test]
fn test_config_init_fails_if_exists() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    fs::write(&config_path, "# existing config").unwrap();

    cargo_bin_cmd!("atlas")
        .env("ATLAS_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_config_set_url_persists_value() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    cargo_bin_cmd!("atlas")
        .env("ATLAS_HOME", dir.path())
        .args(["config", "set-url", "http://10.0.0.5:9000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Base URL set to"));

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("http://10.0.0.5:9000"));
}

#[test]
fn test_config_set_url_rejects_invalid() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("atlas")
        .env("ATLAS_HOME", dir.path())
        .args(["config", "set-url", "not a url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid base URL"));
}

#[test]
fn test_commands_log_to_file() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("atlas")
        .env("ATLAS_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success();

    // Every dispatched subcommand leaves a trace in $ATLAS_HOME/logs/.
    let logs: String = fs::read_dir(dir.path().join("logs"))
        .unwrap()
        .map(|entry| fs::read_to_string(entry.unwrap().path()).unwrap())
        .collect();
    assert!(logs.contains("dispatching command"));
    assert!(logs.contains("config"));
}

#[test]
fn test_config_help_shows_subcommands() {
    cargo_bin_cmd!("atlas")
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("path"))
        .stdout(predicate::str::contains("init"));
}
