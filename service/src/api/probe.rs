//! 兄弟サービスへのプローブAPIハンドラー

use super::error::AppError;
use crate::AppState;
use axum::{extract::State, Json};
use netseg_common::policy::Route;
use netseg_common::types::{ProbeReport, ResponseEnvelope};
use tracing::info;

/// GET /call-others - 兄弟サービスの公開/非公開ルートへの到達性を検証する
pub async fn call_others(
    State(state): State<AppState>,
) -> Result<Json<ResponseEnvelope<ProbeReport>>, AppError> {
    state.ensure_allowed(Route::CallOthers)?;
    info!("Inter-service communication test started");

    let report = state.prober.probe_siblings().await;

    Ok(Json(ResponseEnvelope::new(
        state.service_name(),
        Route::CallOthers.path(),
        report,
    )))
}
