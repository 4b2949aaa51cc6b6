//! netseg 共通ライブラリ
//!
//! 3つのサービスインスタンスが共有する型・設定・ルート公開ポリシー

#![warn(missing_docs)]

/// 設定管理
pub mod config;

/// エラー型定義
pub mod error;

/// モード別ルート公開ポリシー
pub mod policy;

/// レスポンスエンベロープ・プローブ結果の型定義
pub mod types;
