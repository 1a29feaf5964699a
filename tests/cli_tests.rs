//! CLI integration tests.

mod support;

use std::fs;
use std::path::PathBuf;

use assert_cmd::assert::{Assert, OutputAssertExt};
use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use haltctl::infrastructure::config::settings::TEMPLATE;
use predicates::prelude::*;
use support::http::{self, CannedResponse};
use tempfile::TempDir;

fn haltctl() -> Command {
    let mut cmd = cargo_bin_cmd!("haltctl");
    cmd.env_remove("HALTCTL_BASE_URL")
        .env_remove("HALTCTL_OPERATOR")
        .env_remove("RUST_LOG");
    cmd
}

fn config_pointing_at(dir: &TempDir, base_url: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    let contents = TEMPLATE.replace("https://control.example.com", base_url);
    fs::write(&path, contents).expect("write config");
    path
}

/// Run a blocking command while the async test runtime keeps serving.
async fn run(mut cmd: Command) -> Assert {
    tokio::task::spawn_blocking(move || cmd.output().expect("run haltctl"))
        .await
        .expect("command thread")
        .assert()
}

#[test]
fn help_lists_commands() {
    haltctl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("watch"))
        .stdout(predicate::str::contains("halt"))
        .stdout(predicate::str::contains("resume"))
        .stdout(predicate::str::contains("health"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn version_prints_name() {
    haltctl()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("haltctl"));
}

#[test]
fn config_init_writes_template() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    haltctl()
        .args(["config", "init"])
        .arg(&path)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&path).unwrap(), TEMPLATE);
}

#[test]
fn config_init_refuses_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "keep me").unwrap();

    haltctl()
        .args(["config", "init"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    assert_eq!(fs::read_to_string(&path).unwrap(), "keep me");
}

#[test]
fn config_validate_accepts_template() {
    let dir = tempfile::tempdir().unwrap();
    let path = config_pointing_at(&dir, "https://cp.test");

    haltctl()
        .args(["config", "validate", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"));
}

#[test]
fn config_validate_reports_missing_base_url() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[operator]\nid = \"desk-1\"\n").unwrap();

    haltctl()
        .args(["config", "validate", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("base_url"));
}

#[test]
fn config_show_json_includes_status_url() {
    let dir = tempfile::tempdir().unwrap();
    let path = config_pointing_at(&dir, "https://cp.test");

    haltctl()
        .args(["config", "show", "--json", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("wss://cp.test/ws/status"));
}

#[test]
fn halt_requires_reason() {
    haltctl()
        .arg("halt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--reason"));
}

#[tokio::test(flavor = "multi_thread")]
async fn accepted_halt_reports_json_result() {
    let server = http::serve(vec![CannedResponse::ok(r#"{"success":true,"message":"ok"}"#)]).await;
    let dir = tempfile::tempdir().unwrap();
    let path = config_pointing_at(&dir, &server.base_url);

    let mut cmd = haltctl();
    cmd.args(["halt", "--reason", "drawdown", "--liquidate", "--yes", "--json", "-c"])
        .arg(&path);

    run(cmd)
        .await
        .success()
        .stdout(predicate::str::contains(r#""accepted":true"#))
        .stdout(predicate::str::contains(r#""halted":true"#));

    let body = server.requests()[0].json();
    assert_eq!(body["liquidate"], true);
    assert_eq!(body["reason"], "drawdown");
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_halt_fails_with_remote_message() {
    let server = http::serve(vec![CannedResponse::ok(
        r#"{"success":false,"message":"drawdown limit check failed"}"#,
    )])
    .await;
    let dir = tempfile::tempdir().unwrap();
    let path = config_pointing_at(&dir, &server.base_url);

    let mut cmd = haltctl();
    cmd.args(["halt", "--reason", "manual", "--yes", "-c"]).arg(&path);

    run(cmd)
        .await
        .failure()
        .stdout(predicate::str::contains("drawdown limit check failed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn resume_over_legacy_endpoint_is_unsupported() {
    let server = http::serve(vec![]).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        format!(
            "[control]\nbase_url = \"{}\"\nendpoint = \"legacy_kill\"\n",
            server.base_url
        ),
    )
    .unwrap();

    let mut cmd = haltctl();
    cmd.args(["resume", "--reason", "back", "--yes", "-c"]).arg(&path);

    run(cmd)
        .await
        .failure()
        .stderr(predicate::str::contains("legacy kill"));
    assert!(server.requests().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn healthy_service_reports_online_indicator() {
    let server = http::serve(vec![CannedResponse::ok("{}")]).await;
    let dir = tempfile::tempdir().unwrap();
    let path = config_pointing_at(&dir, &server.base_url);

    let mut cmd = haltctl();
    cmd.args(["health", "--json", "-c"]).arg(&path);

    run(cmd)
        .await
        .success()
        .stdout(predicate::str::contains(r#""healthy":true"#))
        .stdout(predicate::str::contains(r#""state":"online""#));
    assert_eq!(server.requests()[0].path, "/health");
}

#[tokio::test(flavor = "multi_thread")]
async fn unhealthy_service_reports_error_indicator() {
    let server = http::serve(vec![CannedResponse::json(503, "{}")]).await;
    let dir = tempfile::tempdir().unwrap();
    let path = config_pointing_at(&dir, &server.base_url);

    let mut cmd = haltctl();
    cmd.args(["health", "--json", "-c"]).arg(&path);

    run(cmd)
        .await
        .failure()
        .stdout(predicate::str::contains(r#""healthy":false"#))
        .stdout(predicate::str::contains("service reports unhealthy"));
}

#[test]
fn health_of_unreachable_service_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = config_pointing_at(&dir, "http://127.0.0.1:1");

    haltctl()
        .args(["health", "--quiet", "-c"])
        .arg(&path)
        .assert()
        .failure();
}
