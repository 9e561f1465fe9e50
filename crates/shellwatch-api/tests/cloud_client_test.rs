#![allow(clippy::unwrap_used)]
// Integration tests for `CloudClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shellwatch_api::{CloudClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, CloudClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = CloudClient::with_base_url(
        reqwest::Client::new(),
        base_url,
        "test-token".to_string().into(),
    );
    (server, client)
}

fn ht_envelope() -> serde_json::Value {
    json!({
        "isok": true,
        "data": {
            "devices_status": {
                "ABC123": {
                    "tmp": { "value": 21.5 },
                    "hum": { "value": 47 },
                    "getinfo": { "fw_info": { "device": "shellyht-1", "fw": "1.0" } }
                }
            }
        }
    })
}

// ── Success path ────────────────────────────────────────────────────

#[tokio::test]
async fn all_status_parses_devices() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/device/all_status"))
        .and(query_param("auth_key", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ht_envelope()))
        .mount(&server)
        .await;

    let devices = client.all_status().await.unwrap();

    assert_eq!(devices.len(), 1);
    let status = &devices["ABC123"];
    assert_eq!(status.number(&["tmp", "value"]), Some(21.5));
    assert_eq!(status.number(&["hum", "value"]), Some(47.0));
    assert_eq!(status.getinfo.fw_info.device, "shellyht-1");
}

#[tokio::test]
async fn all_status_preserves_upstream_order() {
    let (server, client) = setup().await;

    // Raw body so key order is under our control, not serde_json's.
    let body = r#"{"isok":true,"data":{"devices_status":{
        "C3":{"getinfo":{"fw_info":{"device":"shellyht-v1","fw":"1.0"}}},
        "A1":{"getinfo":{"fw_info":{"device":"shellyht-v2","fw":"2.0"}}},
        "B2":{"getinfo":{"fw_info":{"device":"shellyplug-s","fw":"1.1"}}}
    }}}"#;

    Mock::given(method("POST"))
        .and(path("/device/all_status"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let devices = client.all_status().await.unwrap();
    let ids: Vec<&str> = devices.keys().map(String::as_str).collect();
    assert_eq!(ids, ["C3", "A1", "B2"]);
}

// ── Failure paths ───────────────────────────────────────────────────

#[tokio::test]
async fn non_200_is_status_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/device/all_status"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client.all_status().await;
    assert!(
        matches!(result, Err(Error::Status { status: 500 })),
        "expected Status error, got: {result:?}"
    );
}

#[tokio::test]
async fn unauthorized_is_authentication_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/device/all_status"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.all_status().await;
    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn isok_false_is_rejected_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/device/all_status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "isok": false,
            "errors": { "invalid_token": true }
        })))
        .mount(&server)
        .await;

    let result = client.all_status().await;
    match result {
        Err(Error::Rejected { message }) => assert!(message.contains("invalid_token")),
        other => panic!("expected Rejected error, got: {other:?}"),
    }
}

#[tokio::test]
async fn slow_response_is_timeout_with_configured_bound() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/device/all_status"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ht_envelope())
                .set_delay(std::time::Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let http = reqwest::Client::builder()
        .timeout(std::time::Duration::from_millis(100))
        .build()
        .unwrap();
    let client = CloudClient::with_base_url(
        http,
        Url::parse(&server.uri()).unwrap(),
        "test-token".to_string().into(),
    );

    let result = client.all_status().await;
    assert!(
        matches!(result, Err(Error::Timeout { timeout_secs: 10 })),
        "expected Timeout with the configured bound, got: {result:?}"
    );
}

#[tokio::test]
async fn malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/device/all_status"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let result = client.all_status().await;
    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn isok_true_without_data_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/device/all_status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "isok": true })))
        .mount(&server)
        .await;

    let result = client.all_status().await;
    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}
