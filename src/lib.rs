//! Service Monitor
//!
//! 登録済みネットワークサービスの稼働状況を定期監視するサーバー

#![warn(missing_docs)]

/// REST APIハンドラー
pub mod api;

/// CLIインターフェース
pub mod cli;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// データベースアクセス
pub mod db;

/// エラー型
pub mod error;

/// ヘルスチェック監視
pub mod health;

/// ロギング初期化ユーティリティ
pub mod logging;

/// チェックスケジューラー
pub mod scheduler;

/// 型定義
pub mod types;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// データベース接続プール
    pub db_pool: sqlx::SqlitePool,
    /// サービスチェッカー（手動トリガー用）
    pub checker: health::ServiceChecker,
    /// チェックスケジューラー
    pub scheduler: scheduler::CheckScheduler,
}
