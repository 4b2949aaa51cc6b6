//! 非公開情報APIハンドラー

use super::error::AppError;
use crate::AppState;
use axum::{extract::State, Json};
use netseg_common::policy::Route;
use netseg_common::types::{InternalConfig, PrivateInfoData, ResponseEnvelope};
use tracing::info;

/// 専用非公開リスナーが返すネットワーク種別
pub const PRIVATE_ONLY_NETWORK: &str = "private_only";

/// GET /private/info - センシティブな固定ペイロードを返す
pub async fn private_info(
    State(state): State<AppState>,
) -> Result<Json<ResponseEnvelope<PrivateInfoData>>, AppError> {
    state.ensure_allowed(Route::PrivateInfo)?;
    info!(
        dedicated_listener = state.dedicated_private,
        "Private info endpoint called"
    );

    let config = &state.config;
    let data = PrivateInfoData {
        sensitive_data: format!("Private information from {}", config.service_name),
        internal_config: InternalConfig {
            private_port: config.private_port,
            secret_key: config.secret_key.clone(),
            network: state
                .dedicated_private
                .then(|| PRIVATE_ONLY_NETWORK.to_string()),
        },
        note: config.probe.profile.private_info_note().map(str::to_string),
    };

    Ok(Json(ResponseEnvelope::new(
        state.service_name(),
        Route::PrivateInfo.path(),
        data,
    )))
}
