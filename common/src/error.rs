//! エラー型定義
//!
//! 設定値の解析・検証エラー（thiserror使用）

use thiserror::Error;

/// Common layer error type
#[derive(Debug, Error)]
pub enum CommonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unknown APP_MODE value
    #[error("Invalid mode '{0}' (expected one of: public, private, all)")]
    InvalidMode(String),

    /// Unknown isolation profile value
    #[error("Invalid isolation profile '{0}' (expected one of: isolation, blocking)")]
    InvalidProfile(String),
}
