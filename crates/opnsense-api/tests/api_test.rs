#![allow(clippy::unwrap_used)]
// Facade-level tests: credential sources, credential epochs and the
// ISC DHCPv4 namespace, against a wiremock server.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{basic_auth, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use opnsense_api::{ApiConfig, Error, OpnsenseApi};

async fn setup() -> (MockServer, OpnsenseApi) {
    let server = MockServer::start().await;
    let api = OpnsenseApi::new(ApiConfig::new(server.uri()).with_api_key("key", "secret")).unwrap();
    (server, api)
}

// ── Credentials ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_key_file_credentials_are_sent() {
    let server = MockServer::start().await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "key=filekey").unwrap();
    writeln!(file, "secret=\"filesecret\"").unwrap();

    Mock::given(method("GET"))
        .and(path("/api/kea/service/status"))
        .and(basic_auth("filekey", "filesecret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "running" })))
        .expect(1)
        .mount(&server)
        .await;

    let api = OpnsenseApi::new(
        ApiConfig::new(server.uri())
            .with_api_key_file(file.path())
            .with_api_key("ignored", "ignored"),
    )
    .unwrap();

    assert_eq!(api.api_key(), "filekey");
    api.kea().service().status().await.unwrap();
}

#[tokio::test]
async fn test_set_credentials_starts_new_epoch() {
    let (server, mut api) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/kea/service/status"))
        .and(basic_auth("key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "who": "old" })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/kea/service/status"))
        .and(basic_auth("k2", "s2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "who": "new" })))
        .expect(1)
        .mount(&server)
        .await;

    let before = api.kea();
    assert_eq!(before.service().status().await.unwrap()["who"], "old");

    api.set_credentials("k2", "s2").unwrap();
    let after = api.kea();
    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(api.api_key(), "k2");

    assert_eq!(after.service().status().await.unwrap()["who"], "new");
    // A wrapper from the previous epoch keeps its credentials.
    assert_eq!(before.service().status().await.unwrap()["who"], "old");
}

#[tokio::test]
async fn test_missing_key_file_fails_construction() {
    let result = OpnsenseApi::new(
        ApiConfig::new("https://192.168.1.1").with_api_key_file("/nonexistent/apikey.txt"),
    );
    assert!(
        matches!(result, Err(Error::CredentialFileNotFound { .. })),
        "got {result:?}"
    );
}

#[tokio::test]
async fn test_base_url_normalization_is_applied() {
    let api = OpnsenseApi::new(
        ApiConfig::new("https://fw.example.com:8443/api/").with_api_key("k", "s"),
    )
    .unwrap();
    assert_eq!(api.base_url().as_str(), "https://fw.example.com:8443/api");
}

#[tokio::test]
async fn test_sub_second_timeout_still_reaches_server() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/kea/service/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "running" })))
        .expect(1)
        .mount(&server)
        .await;

    let api = OpnsenseApi::new(
        ApiConfig::new(server.uri())
            .with_api_key("key", "secret")
            .with_timeout(Duration::from_millis(500)),
    )
    .unwrap();

    assert_eq!(api.timeout(), Duration::from_secs(1));
    let resp = api.kea().service().status().await.unwrap();
    assert_eq!(resp["status"], "running");
}

#[tokio::test]
async fn test_empty_key_file_path_falls_back_to_pair() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/dhcpv4/service/status"))
        .and(basic_auth("key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "running" })))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = ApiConfig::new(server.uri()).with_api_key("key", "secret");
    config.api_key_file = Some(std::path::PathBuf::new());
    let api = OpnsenseApi::new(config).unwrap();

    api.dhcpv4().service().status().await.unwrap();
}

// ── ISC DHCPv4 ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_dhcpv4_search_lease() {
    let (server, api) = setup().await;

    let leases = json!({
        "rows": [
            { "address": "192.168.1.50", "mac": "00:11:22:33:44:55", "hostname": "laptop", "type": "dynamic" }
        ],
        "total": 1
    });
    Mock::given(method("GET"))
        .and(path("/api/dhcpv4/leases/searchLease"))
        .and(basic_auth("key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&leases))
        .expect(1)
        .mount(&server)
        .await;

    let resp = api.dhcpv4().leases().search_lease().await.unwrap();
    assert_eq!(resp, leases);
}

#[tokio::test]
async fn test_dhcpv4_del_lease() {
    let (server, api) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/dhcpv4/leases/delLease/192.168.1.50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "deleted" })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = api.dhcpv4().leases().del_lease("192.168.1.50").await.unwrap();
    assert_eq!(resp["result"], "deleted");
}

#[tokio::test]
async fn test_dhcpv4_service_actions() {
    let (server, api) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/dhcpv4/service/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "running" })))
        .expect(1)
        .mount(&server)
        .await;
    for action in ["start", "stop", "restart", "reconfigure"] {
        Mock::given(method("POST"))
            .and(path(format!("/api/dhcpv4/service/{action}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": action })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let dhcpv4 = api.dhcpv4();
    let service = dhcpv4.service();
    assert_eq!(service.status().await.unwrap()["status"], "running");
    assert_eq!(service.start().await.unwrap()["response"], "start");
    assert_eq!(service.stop().await.unwrap()["response"], "stop");
    assert_eq!(service.restart().await.unwrap()["response"], "restart");
    assert_eq!(service.reconfigure().await.unwrap()["response"], "reconfigure");
}

#[tokio::test]
async fn test_empty_response_body_is_null() {
    let (server, api) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/dhcpv4/service/stop"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let resp = api.dhcpv4().service().stop().await.unwrap();
    assert!(resp.is_null());
}
