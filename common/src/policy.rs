//! モード別ルート公開ポリシー
//!
//! `APP_MODE` によってどのルートを公開するかを一箇所で決定する。
//! 全ハンドラーは `allowed()` を経由してゲートされる。

use crate::error::CommonError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// サービスの稼働モード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// 公開ルートのみ
    Public,
    /// 非公開ルートのみ
    Private,
    /// 全ルート
    #[default]
    All,
}

impl Mode {
    /// 文字列表現
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Public => "public",
            Mode::Private => "private",
            Mode::All => "all",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" => Ok(Mode::Public),
            "private" => Ok(Mode::Private),
            "all" => Ok(Mode::All),
            other => Err(CommonError::InvalidMode(other.to_string())),
        }
    }
}

/// サービスが提供するルート
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `GET/POST /public/echo`
    PublicEcho,
    /// `GET /private/info`
    PrivateInfo,
    /// `GET /health`
    Health,
    /// `GET /call-others`
    CallOthers,
}

impl Route {
    /// 全ルート
    pub const ALL: [Route; 4] = [
        Route::PublicEcho,
        Route::PrivateInfo,
        Route::Health,
        Route::CallOthers,
    ];

    /// ルートのパス
    pub fn path(&self) -> &'static str {
        match self {
            Route::PublicEcho => "/public/echo",
            Route::PrivateInfo => "/private/info",
            Route::Health => "/health",
            Route::CallOthers => "/call-others",
        }
    }

    /// パスからルートを引く
    pub fn from_path(path: &str) -> Option<Route> {
        Route::ALL.into_iter().find(|route| route.path() == path)
    }

    /// 非公開セグメント向けのルートか
    pub fn is_private(&self) -> bool {
        matches!(self, Route::PrivateInfo)
    }
}

/// 指定モードでルートを公開するか判定する
///
/// - `private`: `/private/info` のみ
/// - `public`: `/private/info` 以外
/// - `all`: 全ルート
pub fn allowed(route: Route, mode: Mode) -> bool {
    match mode {
        Mode::All => true,
        Mode::Public => !route.is_private(),
        Mode::Private => route.is_private(),
    }
}
