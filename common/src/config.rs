//! 設定管理
//!
//! ServiceConfig, ProbeConfig等の設定構造体。
//! 起動時に一度だけ組み立て、Responder/Proberへ明示的に渡す。

use crate::error::CommonError;
use crate::policy::Mode;
use crate::types::ProbeStatus;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// URLテンプレート中のサービス名プレースホルダー
pub const SERVICE_PLACEHOLDER: &str = "{service}";

/// 非公開ルートのプローブ結果をどの語彙で分類するか
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IsolationProfile {
    /// `accessible_but_shouldnt_be` / `properly_isolated`
    #[default]
    Isolation,
    /// `unexpected_success` / `blocked_as_expected`
    Blocking,
}

impl IsolationProfile {
    /// 文字列表現
    pub fn as_str(&self) -> &'static str {
        match self {
            IsolationProfile::Isolation => "isolation",
            IsolationProfile::Blocking => "blocking",
        }
    }

    /// 非公開ルートに到達できた場合の分類
    pub fn private_reached(&self) -> ProbeStatus {
        match self {
            IsolationProfile::Isolation => ProbeStatus::AccessibleButShouldntBe,
            IsolationProfile::Blocking => ProbeStatus::UnexpectedSuccess,
        }
    }

    /// 非公開ルートに到達できなかった場合の分類
    pub fn private_blocked(&self) -> ProbeStatus {
        match self {
            IsolationProfile::Isolation => ProbeStatus::ProperlyIsolated,
            IsolationProfile::Blocking => ProbeStatus::BlockedAsExpected,
        }
    }

    /// 非公開ルートに到達できた場合の補足
    pub fn private_reached_note(&self) -> Option<&'static str> {
        match self {
            IsolationProfile::Isolation => {
                Some("This should NOT be accessible - indicates network isolation failure")
            }
            IsolationProfile::Blocking => None,
        }
    }

    /// `/call-others` の説明文
    pub fn explanation(&self) -> Option<&'static str> {
        match self {
            IsolationProfile::Isolation => Some(
                "Private endpoints should be isolated and only accessible within each service's private network. Public endpoints remain accessible between services.",
            ),
            IsolationProfile::Blocking => None,
        }
    }

    /// `/public/echo` の補足
    pub fn echo_note(&self) -> Option<&'static str> {
        match self {
            IsolationProfile::Isolation => {
                Some("This endpoint is accessible from other services via public network")
            }
            IsolationProfile::Blocking => None,
        }
    }

    /// `/private/info` の補足
    pub fn private_info_note(&self) -> Option<&'static str> {
        match self {
            IsolationProfile::Isolation => Some(
                "This endpoint should only be accessible within the same service's private network",
            ),
            IsolationProfile::Blocking => None,
        }
    }
}

impl fmt::Display for IsolationProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IsolationProfile {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "isolation" => Ok(IsolationProfile::Isolation),
            "blocking" => Ok(IsolationProfile::Blocking),
            other => Err(CommonError::InvalidProfile(other.to_string())),
        }
    }
}

/// プローブ設定
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProbeConfig {
    /// 既知のサービス名一覧 (デフォルト: service1, service2, service3)
    #[serde(default = "default_known_services")]
    pub known_services: Vec<String>,

    /// 公開ルートのベースURLテンプレート (デフォルト: "http://{service}:8080")
    #[serde(default = "default_public_url_template")]
    pub public_url_template: String,

    /// 非公開ルートのベースURLテンプレート (デフォルト: "http://{service}-private:8081")
    #[serde(default = "default_private_url_template")]
    pub private_url_template: String,

    /// 1回のプローブのタイムアウト（秒）(デフォルト: 5)
    #[serde(default = "default_probe_timeout")]
    pub timeout_secs: u64,

    /// 分類語彙 (デフォルト: isolation)
    #[serde(default)]
    pub profile: IsolationProfile,
}

fn default_known_services() -> Vec<String> {
    vec![
        "service1".to_string(),
        "service2".to_string(),
        "service3".to_string(),
    ]
}

fn default_public_url_template() -> String {
    "http://{service}:8080".to_string()
}

fn default_private_url_template() -> String {
    "http://{service}-private:8081".to_string()
}

fn default_probe_timeout() -> u64 {
    5
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            known_services: default_known_services(),
            public_url_template: default_public_url_template(),
            private_url_template: default_private_url_template(),
            timeout_secs: default_probe_timeout(),
            profile: IsolationProfile::default(),
        }
    }
}

impl ProbeConfig {
    /// タイムアウト
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// 自身以外の既知サービス（登録順）
    pub fn siblings(&self, self_name: &str) -> Vec<String> {
        self.known_services
            .iter()
            .filter(|name| name.as_str() != self_name)
            .cloned()
            .collect()
    }

    /// 指定サービスの公開ベースURL
    pub fn public_base_url(&self, service: &str) -> String {
        render_template(&self.public_url_template, service)
    }

    /// 指定サービスの非公開ベースURL
    pub fn private_base_url(&self, service: &str) -> String {
        render_template(&self.private_url_template, service)
    }
}

/// サービス設定
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceConfig {
    /// サービス名 (デフォルト: "service1")
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// バインドアドレス (デフォルト: "0.0.0.0")
    #[serde(default = "default_bind_host")]
    pub bind_host: String,

    /// 公開ポート (デフォルト: 8080)
    #[serde(default = "default_public_port")]
    pub public_port: u16,

    /// 非公開ポート (デフォルト: 8081)
    #[serde(default = "default_private_port")]
    pub private_port: u16,

    /// 稼働モード (デフォルト: all)
    #[serde(default)]
    pub mode: Mode,

    /// 非公開ポートに専用リスナーを追加起動するか (デフォルト: false)
    #[serde(default)]
    pub private_listener: bool,

    /// `/private/info` が返す秘密鍵
    #[serde(default = "default_secret_key")]
    pub secret_key: String,

    /// プローブ設定
    #[serde(default)]
    pub probe: ProbeConfig,
}

fn default_service_name() -> String {
    "service1".to_string()
}

fn default_bind_host() -> String {
    "0.0.0.0".to_string()
}

fn default_public_port() -> u16 {
    8080
}

fn default_private_port() -> u16 {
    8081
}

fn default_secret_key() -> String {
    "super-secret-key-12345".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            bind_host: default_bind_host(),
            public_port: default_public_port(),
            private_port: default_private_port(),
            mode: Mode::default(),
            private_listener: false,
            secret_key: default_secret_key(),
            probe: ProbeConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// 設定値を検証する
    pub fn validate(&self) -> Result<(), CommonError> {
        if self.service_name.trim().is_empty() {
            return Err(CommonError::Config("service name must not be empty".into()));
        }
        if self.probe.known_services.is_empty() {
            return Err(CommonError::Config(
                "known services must not be empty".into(),
            ));
        }
        for (name, template) in [
            ("public peer URL template", &self.probe.public_url_template),
            ("private peer URL template", &self.probe.private_url_template),
        ] {
            if template.trim().is_empty() {
                return Err(CommonError::Config(format!("{name} must not be empty")));
            }
        }
        if self.probe.timeout_secs == 0 {
            return Err(CommonError::Config(
                "probe timeout must be at least 1 second".into(),
            ));
        }
        Ok(())
    }

    /// 自身以外の既知サービス
    pub fn siblings(&self) -> Vec<String> {
        self.probe.siblings(&self.service_name)
    }
}

/// カンマ区切りのサービス名一覧を分解する（空要素は無視）
pub fn parse_service_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// URLテンプレートの `{service}` を置換し、末尾の `/` を除く
pub fn render_template(template: &str, service: &str) -> String {
    template
        .trim()
        .trim_end_matches('/')
        .replace(SERVICE_PLACEHOLDER, service)
}
