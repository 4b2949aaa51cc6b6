//! サービスエラー型定義
//!
//! ルートゲート・HTTPクライアント・リスナーのエラー（thiserror使用）

use netseg_common::error::CommonError;
use netseg_common::policy::{Mode, Route};
use thiserror::Error;

/// Service error type
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Common layer error
    #[error(transparent)]
    Common(#[from] CommonError),

    /// Route is disabled for the running mode
    #[error("{}", unavailable_reason(.route))]
    RouteUnavailable {
        /// 要求されたルート
        route: Route,
        /// 稼働中のモード
        mode: Mode,
    },

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Http(String),

    /// Listener could not bind its address
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        /// バインド先アドレス
        addr: String,
        /// 元のI/Oエラー
        #[source]
        source: std::io::Error,
    },

    /// Listener stopped with an I/O error
    #[error("Server error on {addr}: {source}")]
    Serve {
        /// リスナーのアドレス
        addr: String,
        /// 元のI/Oエラー
        #[source]
        source: std::io::Error,
    },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns a safe error message for external clients.
    ///
    /// Route gating reasons are returned verbatim; everything else is
    /// reduced to a generic message so that addresses and ports only
    /// show up in server logs.
    pub fn external_message(&self) -> String {
        match self {
            Self::RouteUnavailable { route, .. } => unavailable_reason(route).to_string(),
            Self::Common(_) => "Configuration error".to_string(),
            Self::Http(_) => "Backend service unavailable".to_string(),
            Self::Bind { .. } | Self::Serve { .. } => "Listener error".to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
        }
    }
}

/// モードによって無効化されたルートの理由文字列
///
/// 各ルートを無効化するモードは一つだけなので、ルートだけで理由が決まる。
fn unavailable_reason(route: &Route) -> &'static str {
    match route {
        Route::PublicEcho => "Public endpoints not available in private mode",
        Route::PrivateInfo => "Private endpoints not available in public mode",
        Route::Health => "Health endpoint not available in private mode",
        Route::CallOthers => "Call-others endpoint not available in private mode",
    }
}
