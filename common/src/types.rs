//! 共通型定義
//!
//! ResponseEnvelope, ProbeResult等のコアデータ型

use crate::policy::Route;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// ISO-8601 (UTC, マイクロ秒, 末尾 `Z`) のタイムスタンプ文字列
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// 全ルート共通のレスポンスエンベロープ
///
/// リクエストごとに生成され、保存されない。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponseEnvelope<T> {
    /// 応答したサービス名
    pub service: String,
    /// 呼び出されたエンドポイント
    pub endpoint: String,
    /// 生成時刻
    pub timestamp: String,
    /// ルート固有のペイロード
    pub data: T,
}

impl<T> ResponseEnvelope<T> {
    /// 現在時刻でエンベロープを作成
    pub fn new(service: impl Into<String>, endpoint: impl Into<String>, data: T) -> Self {
        Self::at(service, endpoint, data, Utc::now())
    }

    /// 指定時刻でエンベロープを作成
    pub fn at(
        service: impl Into<String>,
        endpoint: impl Into<String>,
        data: T,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            service: service.into(),
            endpoint: endpoint.into(),
            timestamp: format_timestamp(at),
            data,
        }
    }
}

/// `/public/echo` のペイロード
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EchoData {
    /// HTTPメソッド
    pub method: String,
    /// 受け取ったクエリまたはJSONボディ
    pub received: Map<String, Value>,
    /// 固定メッセージ
    pub message: String,
    /// 補足
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// `/private/info` の内部設定
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InternalConfig {
    /// 非公開ポート
    pub private_port: u16,
    /// 秘密鍵（デモ用の固定値）
    pub secret_key: String,
    /// 専用リスナーから返す場合のネットワーク種別
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
}

/// `/private/info` のペイロード
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrivateInfoData {
    /// センシティブ情報
    pub sensitive_data: String,
    /// 内部設定
    pub internal_config: InternalConfig,
    /// 補足
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// ポート設定
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ports {
    /// 公開ポート
    pub public: u16,
    /// 非公開ポート
    pub private: u16,
}

/// `/health` のペイロード
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthData {
    /// 常に `healthy`
    pub status: String,
    /// サービス名
    pub service: String,
    /// 設定されたポート
    pub ports: Ports,
}

/// プローブの分類結果
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStatus {
    /// 公開ルートに到達した
    Success,
    /// 公開ルートに到達できなかった
    Failed,
    /// 非公開ルートに到達できてしまった（isolationプロファイル）
    AccessibleButShouldntBe,
    /// 非公開ルートが隔離されていた（isolationプロファイル）
    ProperlyIsolated,
    /// 非公開ルートに到達できてしまった（blockingプロファイル）
    UnexpectedSuccess,
    /// 非公開ルートが遮断されていた（blockingプロファイル）
    BlockedAsExpected,
}

impl ProbeStatus {
    /// 非公開ルートが隔離されていたことを示すか
    pub fn is_isolated(&self) -> bool {
        matches!(
            self,
            ProbeStatus::ProperlyIsolated | ProbeStatus::BlockedAsExpected
        )
    }
}

/// 1回のプローブ結果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProbeResult {
    /// 呼び出し先サービス名
    pub target: String,
    /// 呼び出し先ルート
    pub endpoint: String,
    /// 分類結果
    pub status: ProbeStatus,
    /// HTTPステータスコード（応答があった場合）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// 応答ボディ（応答があった場合）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    /// エラー内容（失敗した場合）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// 補足
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// プローブ結果の集計
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ProbeSummary {
    /// 総プローブ数
    pub total_tests: usize,
    /// 公開ルートへの成功数
    pub public_successes: usize,
    /// 非公開ルートへの試行数
    pub private_attempts: usize,
    /// 非公開ルートが隔離・遮断されていた数
    pub private_blocked: usize,
}

impl ProbeSummary {
    /// プローブ結果から集計する
    pub fn from_results(results: &[ProbeResult]) -> Self {
        let mut summary = Self {
            total_tests: results.len(),
            ..Self::default()
        };

        for result in results {
            match Route::from_path(&result.endpoint) {
                Some(Route::PublicEcho) if result.status == ProbeStatus::Success => {
                    summary.public_successes += 1;
                }
                Some(Route::PrivateInfo) => {
                    summary.private_attempts += 1;
                    if result.status.is_isolated() {
                        summary.private_blocked += 1;
                    }
                }
                _ => {}
            }
        }

        summary
    }
}

/// `/call-others` のペイロード
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProbeReport {
    /// 個々のプローブ結果
    pub test_results: Vec<ProbeResult>,
    /// 集計
    pub summary: ProbeSummary,
    /// 説明文
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl ProbeReport {
    /// 結果リストからレポートを作成
    pub fn new(test_results: Vec<ProbeResult>, explanation: Option<String>) -> Self {
        let summary = ProbeSummary::from_results(&test_results);
        Self {
            test_results,
            summary,
            explanation,
        }
    }
}
