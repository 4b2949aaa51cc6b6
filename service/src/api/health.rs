//! ヘルスチェックAPIハンドラー

use super::error::AppError;
use crate::AppState;
use axum::{extract::State, Json};
use netseg_common::policy::Route;
use netseg_common::types::{HealthData, Ports, ResponseEnvelope};
use tracing::info;

/// GET /health - 稼働状態と設定ポートを返す
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<ResponseEnvelope<HealthData>>, AppError> {
    state.ensure_allowed(Route::Health)?;
    info!("Health check endpoint called");

    let data = HealthData {
        status: "healthy".to_string(),
        service: state.service_name().to_string(),
        ports: Ports {
            public: state.config.public_port,
            private: state.config.private_port,
        },
    };

    Ok(Json(ResponseEnvelope::new(
        state.service_name(),
        Route::Health.path(),
        data,
    )))
}
