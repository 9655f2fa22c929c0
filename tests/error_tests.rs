//! Error scenario integration tests

use assert_cmd::Command;
use predicates::prelude::*;

fn wintoast_bin(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("wintoast").expect("binary is built");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("APPDATA", home.join("AppData"))
        .env_remove("WINTOAST_APP_ID");
    cmd
}

#[test]
fn unknown_template_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    wintoast_bin(home.path())
        .args(["preview", "--template", "banner"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid template"));
}

#[test]
fn unknown_duration_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    wintoast_bin(home.path())
        .args(["preview", "--duration", "forever"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("forever"));
}

#[test]
fn negative_expiration_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    wintoast_bin(home.path())
        .args(["preview", "--expire-ms=-10"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("expiration"));
}

#[test]
fn non_numeric_wait_is_rejected_by_parser() {
    let home = tempfile::tempdir().unwrap();
    wintoast_bin(home.path())
        .args(["show", "--wait", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--wait"));
}

#[test]
fn config_get_unknown_key() {
    let home = tempfile::tempdir().unwrap();
    wintoast_bin(home.path())
        .args(["config", "get", "unknown_key"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown key"));
}

#[test]
fn config_set_invalid_audio_mode() {
    let home = tempfile::tempdir().unwrap();
    wintoast_bin(home.path())
        .args(["config", "set", "audio_mode", "loud"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("audio_mode"));
}

#[test]
fn missing_subcommand_prints_usage() {
    let home = tempfile::tempdir().unwrap();
    wintoast_bin(home.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
