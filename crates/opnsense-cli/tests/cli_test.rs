//! Integration tests for the `opnsense` CLI binary.
//!
//! Argument parsing, help output, shell completions, and error handling
//! run without a firewall; the end-to-end tests talk to a wiremock server.
#![allow(clippy::unwrap_used)]

use std::io::Write;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{basic_auth, body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command for the `opnsense` binary with env isolation.
///
/// Clears all `OPNSENSE_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn opnsense_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("opnsense");
    cmd.env("HOME", "/tmp/opnsense-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/opnsense-cli-test-nonexistent")
        .env_remove("RUST_LOG")
        .env_remove("OPNSENSE_CONFIG")
        .env_remove("OPNSENSE_BASE_URL")
        .env_remove("OPNSENSE_API_KEY_FILE")
        .env_remove("OPNSENSE_API_KEY")
        .env_remove("OPNSENSE_API_SECRET")
        .env_remove("OPNSENSE_VERIFY_CERT")
        .env_remove("OPNSENSE_CA_CERT")
        .env_remove("OPNSENSE_TIMEOUT");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Run the binary against a mock server off the async runtime.
async fn run_against(server: &MockServer, args: &[&str]) -> std::process::Output {
    let mut full = vec![
        "--base-url".to_owned(),
        server.uri(),
        "--api-key".to_owned(),
        "key".to_owned(),
        "--api-secret".to_owned(),
        "secret".to_owned(),
    ];
    full.extend(args.iter().map(|a| (*a).to_owned()));

    tokio::task::spawn_blocking(move || opnsense_cmd().args(full).output().unwrap())
        .await
        .unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = opnsense_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    opnsense_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("OPNsense")
            .and(predicate::str::contains("kea"))
            .and(predicate::str::contains("dhcpv4"))
            .and(predicate::str::contains("completions")),
    );
}

#[test]
fn test_version_flag() {
    opnsense_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("opnsense"));
}

#[test]
fn test_reservations_help_lists_csv_commands() {
    opnsense_cmd()
        .args(["kea", "reservations", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("download").and(predicate::str::contains("upload")));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    opnsense_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    opnsense_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = opnsense_cmd().arg("foobar").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_no_base_url_is_usage_error() {
    let output = opnsense_cmd()
        .args(["kea", "service", "status"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("No firewall URL"), "got:\n{text}");
}

#[test]
fn test_no_credentials_is_auth_error() {
    let output = opnsense_cmd()
        .args(["--base-url", "https://192.0.2.1", "kea", "service", "status"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    let text = combined_output(&output);
    assert!(text.contains("No API credentials"), "got:\n{text}");
}

#[test]
fn test_missing_key_file() {
    let output = opnsense_cmd()
        .args([
            "--base-url",
            "https://192.0.2.1",
            "--api-key-file",
            "/nonexistent/apikey.txt",
            "dhcpv4",
            "leases",
            "list",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(text.contains("Credentials file not found"), "got:\n{text}");
}

#[test]
fn test_zero_timeout_is_usage_error() {
    let output = opnsense_cmd()
        .args([
            "--base-url",
            "https://192.0.2.1",
            "--api-key",
            "k",
            "--api-secret",
            "s",
            "--timeout",
            "0",
            "kea",
            "service",
            "status",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("at least 1 second"), "got:\n{text}");
}

#[test]
fn test_help_lists_no_verify_cert() {
    opnsense_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--no-verify-cert"));
}

#[test]
fn test_upload_requires_a_source() {
    let output = opnsense_cmd()
        .args(["kea", "reservations", "upload"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_upload_rejects_both_sources() {
    let output = opnsense_cmd()
        .args(["kea", "reservations", "upload", "--file", "a.csv", "--data", "x"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

// ── End-to-end against a mock firewall ──────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_kea_service_status_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/kea/service/status"))
        .and(basic_auth("key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "running" })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_against(&server, &["-o", "json-compact", "kea", "service", "status"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        r#"{"status":"running"}"#
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_subnet_add_from_file() {
    let server = MockServer::start().await;
    let subnet = json!({ "subnet4": { "subnet": "192.168.199.0/24", "description": "lab" } });
    Mock::given(method("POST"))
        .and(path("/api/kea/dhcpv4/addSubnet"))
        .and(body_json(&subnet))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "saved", "uuid": "abc" })))
        .expect(1)
        .mount(&server)
        .await;

    let mut payload = tempfile::NamedTempFile::new().unwrap();
    write!(payload, "{subnet}").unwrap();
    let payload_path = payload.path().to_str().unwrap().to_owned();

    let output = run_against(&server, &["-o", "yaml", "kea", "subnets", "add", &payload_path]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("result: saved"), "got:\n{stdout}");
    assert!(stdout.contains("uuid: abc"), "got:\n{stdout}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_reservations_download_to_file() {
    let server = MockServer::start().await;
    let csv = "ip_address,hw_address,hostname,description\n10.0.0.5,02:00:00:00:00:05,host5,\n";
    Mock::given(method("GET"))
        .and(path("/api/kea/dhcpv4/downloadReservations"))
        .respond_with(ResponseTemplate::new(200).set_body_string(csv))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("reservations.csv");
    let out_str = out.to_str().unwrap().to_owned();

    let output = run_against(&server, &["kea", "reservations", "download", "--out", &out_str]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(std::fs::read_to_string(&out).unwrap(), csv);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dhcpv4_lease_delete() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/dhcpv4/leases/delLease/192.168.1.50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "deleted" })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_against(&server, &["dhcpv4", "leases", "delete", "192.168.1.50"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(String::from_utf8_lossy(&output.stdout).contains("deleted"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_not_found_exit_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/kea/dhcpv4/getPeer/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such peer"))
        .mount(&server)
        .await;

    let output = run_against(&server, &["kea", "peers", "get", "missing"]).await;
    assert_eq!(output.status.code(), Some(4), "{}", combined_output(&output));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unauthorized_exit_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/kea/service/reconfigure"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let output = run_against(&server, &["kea", "service", "reconfigure"]).await;
    assert_eq!(output.status.code(), Some(3), "{}", combined_output(&output));
}
