use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use netseg_common::config::ServiceConfig;
use netseg_common::policy::Mode;
use netseg_service::probe::Prober;
use netseg_service::AppState;
use serde_json::Value;
use tower::ServiceExt;

/// 兄弟サービスを持たないテスト用設定
pub fn isolated_config(mode: Mode) -> ServiceConfig {
    let mut config = ServiceConfig {
        mode,
        public_port: 18080,
        private_port: 18081,
        secret_key: "test-secret".to_string(),
        ..ServiceConfig::default()
    };
    config.probe.known_services = vec![config.service_name.clone()];
    config
}

/// 設定から状態を作る
pub fn create_state(config: ServiceConfig) -> AppState {
    let config = Arc::new(config);
    let prober = Prober::new(config.clone()).unwrap();
    AppState::new(config, prober)
}

/// リクエストを送り、ステータスとJSONボディを返す
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

/// GETリクエストを送る
pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

/// JSONボディ付きPOSTリクエストを送る
pub async fn post(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}
