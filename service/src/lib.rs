//! Network segmentation demo service
//!
//! 公開ルートと非公開ルートを持つHTTPサービス。
//! 兄弟サービスへのプローブでネットワーク分離を検証する。

#![warn(missing_docs)]

/// REST APIハンドラー
pub mod api;

/// CLIインターフェース
pub mod cli;

/// サービスエラー型
pub mod error;

/// ロギング初期化ユーティリティ
pub mod logging;

/// 兄弟サービスへの到達性プローブ
pub mod probe;

/// リスナー起動
pub mod server;

use crate::error::ServiceError;
use netseg_common::config::ServiceConfig;
use netseg_common::policy::{allowed, Mode, Route};
use std::sync::Arc;

/// アプリケーション状態
///
/// 公開リスナーと専用非公開リスナーは同じ状態から組み立てられ、
/// 違いは `mode` と `dedicated_private` だけ。
#[derive(Clone)]
pub struct AppState {
    /// 起動時に確定した設定
    pub config: Arc<ServiceConfig>,
    /// 到達性プローバー
    pub prober: probe::Prober,
    /// このリスナーで適用するモード
    pub mode: Mode,
    /// 専用非公開リスナーとして動作しているか
    pub dedicated_private: bool,
}

impl AppState {
    /// 設定のモードで状態を作成
    pub fn new(config: Arc<ServiceConfig>, prober: probe::Prober) -> Self {
        let mode = config.mode;
        Self {
            config,
            prober,
            mode,
            dedicated_private: false,
        }
    }

    /// 専用非公開リスナー用の状態を作成
    pub fn for_private_listener(&self) -> Self {
        Self {
            mode: Mode::Private,
            dedicated_private: true,
            ..self.clone()
        }
    }

    /// ルートがこのリスナーのモードで公開されているか確認
    pub fn ensure_allowed(&self, route: Route) -> Result<(), ServiceError> {
        if allowed(route, self.mode) {
            Ok(())
        } else {
            Err(ServiceError::RouteUnavailable {
                route,
                mode: self.mode,
            })
        }
    }

    /// サービス名
    pub fn service_name(&self) -> &str {
        &self.config.service_name
    }
}
