//! Exit codes and suggestions for failing invocations.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn autoslide(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("autoslide").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env_remove("AUTOSLIDE_CAROUSEL__TICK_INTERVAL_MS");
    cmd
}

#[test]
fn backwards_drag_is_a_user_error() {
    let home = TempDir::new().unwrap();
    autoslide(&home)
        .args(["simulate", "-s", "a,b", "--drag", "9s..3s"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--drag"));
}

#[test]
fn zero_tick_from_environment_is_a_config_error() {
    let home = TempDir::new().unwrap();
    autoslide(&home)
        .env("AUTOSLIDE_CAROUSEL__TICK_INTERVAL_MS", "0")
        .args(["simulate", "-s", "a,b"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("tick_interval"));
}

#[test]
fn settle_longer_than_tick_is_rejected() {
    let home = TempDir::new().unwrap();
    autoslide(&home)
        .args(["simulate", "-s", "a,b", "--tick", "1s", "--settle-delay", "2s"])
        .assert()
        .code(4);
}

#[test]
fn unknown_config_key_is_not_found() {
    let home = TempDir::new().unwrap();
    autoslide(&home)
        .args(["config", "get", "carousel.speed"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("config list"));
}

#[test]
fn missing_explicit_config_file() {
    let home = TempDir::new().unwrap();
    autoslide(&home)
        .args(["-c", "does-not-exist.toml", "config", "list"])
        .assert()
        .code(4);
}

#[test]
fn malformed_tab_route_is_a_parse_error() {
    let home = TempDir::new().unwrap();
    autoslide(&home)
        .args(["tabs", "-p", "/", "-t", "home"])
        .assert()
        .code(2);
}
