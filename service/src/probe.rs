//! 到達性プローバー
//!
//! 兄弟サービスの公開ルートと非公開ルートへ順番にGETを送り、
//! 到達できたかどうかを分類する。失敗は結果として記録し、呼び出し元へは返さない。

use crate::error::ServiceError;
use netseg_common::config::{IsolationProfile, ServiceConfig};
use netseg_common::policy::Route;
use netseg_common::types::{ProbeReport, ProbeResult, ProbeStatus};
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

/// 応答を受け取れたプローブ
#[derive(Debug, Clone, PartialEq)]
pub struct Reached {
    /// HTTPステータスコード
    pub status_code: u16,
    /// JSONボディ
    pub body: Value,
}

/// ルートと到達可否から分類を決める
pub fn classify(route: Route, reached: bool, profile: IsolationProfile) -> ProbeStatus {
    match (route.is_private(), reached) {
        (false, true) => ProbeStatus::Success,
        (false, false) => ProbeStatus::Failed,
        (true, true) => profile.private_reached(),
        (true, false) => profile.private_blocked(),
    }
}

/// 1回分の結果をProbeResultへ変換する
pub fn build_result(
    target: &str,
    route: Route,
    outcome: Result<Reached, String>,
    profile: IsolationProfile,
) -> ProbeResult {
    let status = classify(route, outcome.is_ok(), profile);
    match outcome {
        Ok(reached) => ProbeResult {
            target: target.to_string(),
            endpoint: route.path().to_string(),
            status,
            status_code: Some(reached.status_code),
            response: Some(reached.body),
            error: None,
            note: if route.is_private() {
                profile.private_reached_note().map(str::to_string)
            } else {
                None
            },
        },
        Err(err) => ProbeResult {
            target: target.to_string(),
            endpoint: route.path().to_string(),
            status,
            status_code: None,
            response: None,
            error: Some(err),
            note: None,
        },
    }
}

/// 兄弟サービスへのプローバー
#[derive(Clone)]
pub struct Prober {
    client: Client,
    config: Arc<ServiceConfig>,
}

impl Prober {
    /// 設定のタイムアウトでHTTPクライアントを作成
    pub fn new(config: Arc<ServiceConfig>) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(config.probe.timeout())
            .build()
            .map_err(|e| ServiceError::Http(format!("failed to build probe client: {e}")))?;

        Ok(Self { client, config })
    }

    /// 全兄弟サービスをプローブする
    ///
    /// 兄弟ごとに公開・非公開の順で2件、直列に実行する。
    pub async fn probe_siblings(&self) -> ProbeReport {
        let siblings = self.config.siblings();
        let mut results = Vec::with_capacity(siblings.len() * 2);

        for sibling in &siblings {
            results.push(self.probe_public(sibling).await);
            results.push(self.probe_private(sibling).await);
        }

        let report = ProbeReport::new(
            results,
            self.config.probe.profile.explanation().map(str::to_string),
        );
        info!(
            total = report.summary.total_tests,
            public_successes = report.summary.public_successes,
            private_blocked = report.summary.private_blocked,
            "Inter-service communication test finished"
        );
        report
    }

    /// 公開ルートのプローブ
    pub async fn probe_public(&self, target: &str) -> ProbeResult {
        let url = format!(
            "{}{}",
            self.config.probe.public_base_url(target),
            Route::PublicEcho.path()
        );
        let marker = format!("from_{}", self.config.service_name);
        let outcome = self.fetch(&url, Some(&marker)).await;

        match &outcome {
            Ok(_) => info!(target_service = %target, "Successfully called public endpoint"),
            Err(e) => error!(target_service = %target, error = %e, "Failed to call public endpoint"),
        }

        build_result(target, Route::PublicEcho, outcome, self.config.probe.profile)
    }

    /// 非公開ルートのプローブ
    pub async fn probe_private(&self, target: &str) -> ProbeResult {
        let url = format!(
            "{}{}",
            self.config.probe.private_base_url(target),
            Route::PrivateInfo.path()
        );
        let outcome = self.fetch(&url, None).await;

        match &outcome {
            Ok(reached) => warn!(
                target_service = %target,
                status_code = reached.status_code,
                "Private endpoint was reachable from another service"
            ),
            Err(e) => info!(
                target_service = %target,
                error = %e,
                "Private endpoint properly isolated"
            ),
        }

        build_result(target, Route::PrivateInfo, outcome, self.config.probe.profile)
    }

    async fn fetch(&self, url: &str, test_marker: Option<&str>) -> Result<Reached, String> {
        let mut request = self.client.get(url);
        if let Some(marker) = test_marker {
            request = request.query(&[("test", marker)]);
        }

        let response = request.send().await.map_err(|e| e.to_string())?;
        let status_code = response.status().as_u16();
        let body = response.json::<Value>().await.map_err(|e| e.to_string())?;

        Ok(Reached { status_code, body })
    }
}
