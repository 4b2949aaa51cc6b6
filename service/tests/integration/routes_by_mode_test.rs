//! Integration Test: モード別のルート公開
//!
//! 無効なルートは `{"error": ...}` 付きの404、有効なルートは200を返す。

use axum::http::StatusCode;
use netseg_common::policy::{allowed, Mode, Route};
use netseg_service::api::{create_private_router, create_router};

use crate::support::service::{create_state, get, isolated_config, post};

#[tokio::test]
async fn every_route_follows_the_mode_policy() {
    for mode in [Mode::Public, Mode::Private, Mode::All] {
        for route in Route::ALL {
            let app = create_router(create_state(isolated_config(mode)));
            let (status, json) = get(app, route.path()).await;

            if allowed(route, mode) {
                assert_eq!(status, StatusCode::OK, "{} in {mode}", route.path());
                assert_eq!(json["endpoint"], route.path());
            } else {
                assert_eq!(status, StatusCode::NOT_FOUND, "{} in {mode}", route.path());
                assert!(
                    json["error"].is_string(),
                    "disabled route should carry an error field: {json}"
                );
            }
        }
    }
}

#[tokio::test]
async fn private_mode_error_reasons() {
    let cases = [
        ("/public/echo", "Public endpoints not available in private mode"),
        ("/health", "Health endpoint not available in private mode"),
        ("/call-others", "Call-others endpoint not available in private mode"),
    ];

    for (uri, reason) in cases {
        let app = create_router(create_state(isolated_config(Mode::Private)));
        let (status, json) = get(app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], reason);
    }
}

#[tokio::test]
async fn public_mode_hides_private_info() {
    let app = create_router(create_state(isolated_config(Mode::Public)));
    let (status, json) = get(app, "/private/info").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Private endpoints not available in public mode");
}

#[tokio::test]
async fn post_echo_is_gated_like_get() {
    let app = create_router(create_state(isolated_config(Mode::Private)));
    let (status, json) = post(app, "/public/echo", r#"{"a":1}"#).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Public endpoints not available in private mode");
}

#[tokio::test]
async fn private_router_serves_private_info_only() {
    // 公開モードでも専用リスナーは /private/info を返す
    let state = create_state(isolated_config(Mode::Public));

    let (status, json) = get(create_private_router(state.clone()), "/private/info").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["internal_config"]["network"], "private_only");

    for uri in ["/public/echo", "/health", "/call-others"] {
        let (status, _) = get(create_private_router(state.clone()), uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri} must not be routed");
    }
}

#[tokio::test]
async fn unsupported_method_is_rejected() {
    let app = create_router(create_state(isolated_config(Mode::All)));
    let (status, _) = post(app, "/health", "{}").await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
