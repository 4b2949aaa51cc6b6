//! Integration Test: レスポンスエンベロープとルートペイロード

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use netseg_common::config::IsolationProfile;
use netseg_common::policy::Mode;
use netseg_service::api::create_router;
use serde_json::{json, Value};

use crate::support::service::{create_state, get, isolated_config, post};

fn assert_envelope(json: &Value, endpoint: &str) {
    assert_eq!(json["service"], "service1");
    assert_eq!(json["endpoint"], endpoint);
    assert!(json["data"].is_object(), "data must be an object: {json}");

    let timestamp = json["timestamp"].as_str().expect("timestamp must be a string");
    assert!(timestamp.ends_with('Z'), "timestamp must be UTC: {timestamp}");
    let parsed = DateTime::parse_from_rfc3339(timestamp).expect("timestamp must be ISO-8601");
    assert_eq!(parsed.offset().local_minus_utc(), 0);
    assert!(parsed.with_timezone(&Utc) <= Utc::now());
}

#[tokio::test]
async fn echo_get_returns_query_parameters() {
    let app = create_router(create_state(isolated_config(Mode::All)));
    let (status, json) = get(app, "/public/echo?x=1").await;

    assert_eq!(status, StatusCode::OK);
    assert_envelope(&json, "/public/echo");
    assert_eq!(json["data"]["method"], "GET");
    assert_eq!(json["data"]["received"], json!({"x": "1"}));
    assert_eq!(json["data"]["message"], "Echo from service1");
    assert!(json["data"]["note"].is_string());
}

#[tokio::test]
async fn echo_get_without_query_returns_empty_map() {
    let app = create_router(create_state(isolated_config(Mode::Public)));
    let (status, json) = get(app, "/public/echo").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["received"], json!({}));
}

#[tokio::test]
async fn echo_post_returns_json_body() {
    let app = create_router(create_state(isolated_config(Mode::All)));
    let (status, json) = post(app, "/public/echo", r#"{"a":1}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_envelope(&json, "/public/echo");
    assert_eq!(json["data"]["method"], "POST");
    assert_eq!(json["data"]["received"], json!({"a": 1}));
}

#[tokio::test]
async fn echo_post_with_malformed_body_returns_empty_map() {
    for body in ["{broken", "[1,2]", ""] {
        let app = create_router(create_state(isolated_config(Mode::All)));
        let (status, json) = post(app, "/public/echo", body).await;

        assert_eq!(status, StatusCode::OK, "body {body:?}");
        assert_eq!(json["data"]["received"], json!({}), "body {body:?}");
    }
}

#[tokio::test]
async fn echo_without_note_in_blocking_profile() {
    let mut config = isolated_config(Mode::All);
    config.probe.profile = IsolationProfile::Blocking;
    let app = create_router(create_state(config));
    let (_, json) = get(app, "/public/echo").await;

    assert!(json["data"].get("note").is_none());
}

#[tokio::test]
async fn health_reports_configured_ports() {
    let app = create_router(create_state(isolated_config(Mode::Public)));
    let (status, json) = get(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_envelope(&json, "/health");
    assert_eq!(json["data"]["status"], "healthy");
    assert_eq!(json["data"]["service"], "service1");
    assert_eq!(json["data"]["ports"]["public"], 18080);
    assert_eq!(json["data"]["ports"]["private"], 18081);
}

#[tokio::test]
async fn private_info_includes_secret_and_port() {
    for mode in [Mode::Private, Mode::All] {
        let app = create_router(create_state(isolated_config(mode)));
        let (status, json) = get(app, "/private/info").await;

        assert_eq!(status, StatusCode::OK);
        assert_envelope(&json, "/private/info");
        let data = &json["data"];
        assert_eq!(data["sensitive_data"], "Private information from service1");
        assert_eq!(data["internal_config"]["secret_key"], "test-secret");
        assert_eq!(data["internal_config"]["private_port"], 18081);
        // 専用リスナー以外では network は付かない
        assert!(data["internal_config"].get("network").is_none());
    }
}

#[tokio::test]
async fn call_others_without_siblings_is_empty_report() {
    let app = create_router(create_state(isolated_config(Mode::All)));
    let (status, json) = get(app, "/call-others").await;

    assert_eq!(status, StatusCode::OK);
    assert_envelope(&json, "/call-others");
    assert_eq!(json["data"]["test_results"], json!([]));
    assert_eq!(
        json["data"]["summary"],
        json!({
            "total_tests": 0,
            "public_successes": 0,
            "private_attempts": 0,
            "private_blocked": 0
        })
    );
}
