//! 公開エコーAPIハンドラー

use super::error::AppError;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{RawQuery, State},
    http::Method,
    Json,
};
use netseg_common::policy::Route;
use netseg_common::types::{EchoData, ResponseEnvelope};
use serde_json::{Map, Value};
use tracing::info;

/// GET/POST /public/echo - クエリまたはJSONボディをそのまま返す
pub async fn public_echo(
    State(state): State<AppState>,
    method: Method,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Result<Json<ResponseEnvelope<EchoData>>, AppError> {
    state.ensure_allowed(Route::PublicEcho)?;
    info!(method = %method, "Public echo endpoint called");

    let received = if method == Method::POST {
        json_object(&body)
    } else {
        query_map(query.as_deref().unwrap_or_default())
    };

    let data = EchoData {
        method: method.to_string(),
        received,
        message: format!("Echo from {}", state.service_name()),
        note: state
            .config
            .probe
            .profile
            .echo_note()
            .map(str::to_string),
    };

    Ok(Json(ResponseEnvelope::new(
        state.service_name(),
        Route::PublicEcho.path(),
        data,
    )))
}

/// クエリ文字列をマップへ変換する（同名キーは最初の値を採用）
pub fn query_map(query: &str) -> Map<String, Value> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query).unwrap_or_default();
    let mut map = Map::new();
    for (key, value) in pairs {
        map.entry(key).or_insert(Value::String(value));
    }
    map
}

/// JSONボディをマップへ変換する（不正なJSONやオブジェクト以外は空）
pub fn json_object(body: &[u8]) -> Map<String, Value> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}
