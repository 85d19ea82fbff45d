//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn usersvc() -> Command {
    let mut cmd = Command::cargo_bin("usersvc").unwrap();
    // Keep a stray .env or DB_* variables from leaking in
    cmd.env_clear().current_dir(std::env::temp_dir());
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    usersvc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_serve_help() {
    usersvc()
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"))
        .stdout(predicate::str::contains("DB_HOST"));
}

#[test]
fn test_password_value_hidden_in_help() {
    usersvc()
        .env("DB_PASSWORD", "topsecret")
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("topsecret").not());
}

#[test]
fn test_missing_db_settings_fail() {
    usersvc()
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--db-host"));
}

#[test]
fn test_check_unreachable_database_fails() {
    usersvc()
        .args([
            "check",
            "--db-host",
            "127.0.0.1",
            "--db-user",
            "nobody",
            "--db-password",
            "wrong",
            "--db-name",
            "none",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot connect to 127.0.0.1/none"));
}
