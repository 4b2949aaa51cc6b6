//! REST APIハンドラー
//!
//! 公開エコー、非公開情報、ヘルスチェック、兄弟サービスへのプローブAPI

pub mod echo;
pub mod error;
pub mod health;
pub mod private;
pub mod probe;

use crate::AppState;
use axum::{routing::get, Router};
use netseg_common::policy::Route;
use tower_http::trace::TraceLayer;

/// 全ルートを持つAPIルーターを作成
///
/// 各ハンドラーが `AppState::mode` でゲートするため、
/// 無効なルートも登録したうえで404を返す。
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            Route::PublicEcho.path(),
            get(echo::public_echo).post(echo::public_echo),
        )
        .route(Route::PrivateInfo.path(), get(private::private_info))
        .route(Route::Health.path(), get(health::health_check))
        .route(Route::CallOthers.path(), get(probe::call_others))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 専用非公開リスナー用のルーターを作成（`/private/info` のみ）
pub fn create_private_router(state: AppState) -> Router {
    Router::new()
        .route(Route::PrivateInfo.path(), get(private::private_info))
        .layer(TraceLayer::new_for_http())
        .with_state(state.for_private_listener())
}
