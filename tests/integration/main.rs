//! Integration tests for request-intl.

#![allow(clippy::unwrap_used)] // Tests can use unwrap for cleaner assertions

mod intl;

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to create a command for the request-intl binary.
fn intl_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("request-intl"));
    cmd.env_remove("REQUEST_INTL_CONFIG");
    cmd
}

/// Test that the CLI shows help.
#[test]
fn test_help() {
    intl_cmd().arg("--help").assert().success().stdout(predicate::str::contains("request-intl"));
}

/// Test that the CLI shows version.
#[test]
fn test_version() {
    intl_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

/// Test that unrecognized commands fail.
#[test]
fn test_unknown_command() {
    intl_cmd().arg("unknown-command").assert().failure();
}

/// Without signals or config the default locale wins.
#[test]
fn test_resolve_default() {
    intl_cmd().arg("resolve").assert().success().stdout("en-US\n");
}

/// Query parameters outrank headers.
#[test]
fn test_resolve_priority() {
    intl_cmd()
        .args(["resolve", "--language", "ja-JP", "--header", "x-user-locale=fr-FR"])
        .assert()
        .success()
        .stdout("ja-JP\n");
}

/// A locale outside the accept list falls back to the default.
#[test]
fn test_resolve_rejected_by_accept_list() {
    let (_dir, config) = common::write_config(common::TEST_CONFIG);
    intl_cmd()
        .arg("--config")
        .arg(&config)
        .args(["resolve", "--header", "accept-language=fr-FR"])
        .assert()
        .success()
        .stdout("en-US\n");
}

/// Translate with an explicit locale.
#[test]
fn test_translate_explicit_locale() {
    let (_dir, config) = common::write_config(common::TEST_CONFIG);
    intl_cmd()
        .arg("--config")
        .arg(&config)
        .args(["translate", "--locale", "zh-CN", "hello"])
        .assert()
        .success()
        .stdout("你好世界\n");
}

/// Translate with the locale resolved from request signals.
#[test]
fn test_translate_resolved_locale() {
    let (_dir, config) = common::write_config(common::TEST_CONFIG);
    intl_cmd()
        .arg("--config")
        .arg(&config)
        .args(["translate", "--cookie", "x-user-locale=zh-CN", "hello"])
        .assert()
        .success()
        .stdout("你好世界\n");
}

/// Interpolation values are passed through.
#[test]
fn test_translate_with_args() {
    let (_dir, config) = common::write_config(common::TEST_CONFIG);
    intl_cmd()
        .arg("--config")
        .arg(&config)
        .args(["translate", "greeting", "--arg", "name=John"])
        .assert()
        .success()
        .stdout("Hello John!\n");
}

/// Missing identifiers are echoed back.
#[test]
fn test_translate_missing_key() {
    intl_cmd().args(["translate", "no-such-key"]).assert().success().stdout("no-such-key\n");
}

/// Malformed interpolation arguments are rejected.
#[test]
fn test_translate_bad_arg() {
    intl_cmd()
        .args(["translate", "hello", "--arg", "oops"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("NAME=VALUE"));
}

/// Configured locales are listed with the default marked.
#[test]
fn test_locales() {
    let (_dir, config) = common::write_config(common::TEST_CONFIG);
    intl_cmd()
        .arg("--config")
        .arg(&config)
        .arg("locales")
        .assert()
        .success()
        .stdout("en-US (default)\nzh-CN\n");
}

/// Invalid configuration fails at startup.
#[test]
fn test_invalid_config() {
    let (_dir, config) = common::write_config("cache_size: 0\n");
    intl_cmd()
        .arg("--config")
        .arg(&config)
        .arg("resolve")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cache_size"));
}

/// Test that an unreadable config file exits with the IO code.
#[test]
fn test_missing_config_file() {
    intl_cmd()
        .args(["--config", "/nonexistent/intl.yaml", "resolve"])
        .assert()
        .code(10)
        .stderr(predicate::str::contains("IO error"));
}

/// Test that a config file that does not parse is a configuration failure.
#[test]
fn test_malformed_config_file() {
    let (_dir, config) = common::write_config("default_messages: [unclosed\n");
    intl_cmd()
        .arg("--config")
        .arg(&config)
        .arg("resolve")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("YAML error"));
}
