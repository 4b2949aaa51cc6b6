//! axumリスナー起動
//!
//! モードに応じて1つまたは2つのリスナーを組み立て、並行して動かす。
//! シャットダウン処理は持たず、プロセス終了で停止する。

use crate::error::ServiceError;
use crate::probe::Prober;
use crate::{api, AppState};
use axum::Router;
use netseg_common::config::ServiceConfig;
use netseg_common::policy::Mode;
use std::fmt;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// リスナーの役割
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// モードでゲートされた全ルートを提供
    Main,
    /// `/private/info` のみを提供する専用リスナー
    DedicatedPrivate,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Main => f.write_str("main"),
            Segment::DedicatedPrivate => f.write_str("private"),
        }
    }
}

/// 起動予定のリスナー
pub struct ListenerPlan {
    /// 役割
    pub segment: Segment,
    /// バインドアドレス
    pub bind_addr: String,
    /// 提供するルーター
    pub router: Router,
}

/// 状態からリスナー構成を決める
///
/// - `private`: 非公開ポートに1つ
/// - `public` / `all`: 公開ポートに1つ、`private_listener` 有効時は非公開ポートにもう1つ
pub fn plan_listeners(state: &AppState) -> Vec<ListenerPlan> {
    let config = &state.config;
    let addr_for = |port: u16| format!("{}:{}", config.bind_host, port);

    if state.mode == Mode::Private {
        if config.private_listener {
            warn!("private_listener is ignored in private mode");
        }
        return vec![ListenerPlan {
            segment: Segment::Main,
            bind_addr: addr_for(config.private_port),
            router: api::create_router(state.clone()),
        }];
    }

    let mut plans = vec![ListenerPlan {
        segment: Segment::Main,
        bind_addr: addr_for(config.public_port),
        router: api::create_router(state.clone()),
    }];

    if config.private_listener {
        plans.push(ListenerPlan {
            segment: Segment::DedicatedPrivate,
            bind_addr: addr_for(config.private_port),
            router: api::create_private_router(state.clone()),
        });
    }

    plans
}

/// アドレスにバインドする
pub async fn bind(addr: &str) -> Result<TcpListener, ServiceError> {
    TcpListener::bind(addr).await.map_err(|source| ServiceError::Bind {
        addr: addr.to_string(),
        source,
    })
}

/// バインド済みリスナーでルーターを提供する
pub async fn serve(
    listener: TcpListener,
    router: Router,
    segment: Segment,
) -> Result<(), ServiceError> {
    let addr = listener
        .local_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    info!(segment = %segment, addr = %addr, "Listener started");

    axum::serve(listener, router)
        .await
        .map_err(|source| ServiceError::Serve { addr, source })
}

/// 設定からサービスを起動する
///
/// 全リスナーのバインドが成功してから提供を開始する。
/// いずれかのリスナーが停止した時点でエラーを返す。
pub async fn run(config: ServiceConfig) -> Result<(), ServiceError> {
    config.validate()?;

    let config = Arc::new(config);
    let prober = Prober::new(config.clone())?;
    let state = AppState::new(config.clone(), prober);

    info!(
        service = %config.service_name,
        mode = %config.mode,
        siblings = ?config.siblings(),
        "Starting service"
    );

    let mut bound = Vec::new();
    for plan in plan_listeners(&state) {
        let listener = bind(&plan.bind_addr).await?;
        bound.push((listener, plan));
    }

    let mut tasks = JoinSet::new();
    for (listener, plan) in bound {
        tasks.spawn(serve(listener, plan.router, plan.segment));
    }

    while let Some(joined) = tasks.join_next().await {
        joined.map_err(|e| ServiceError::Internal(format!("listener task failed: {e}")))??;
    }

    Ok(())
}
