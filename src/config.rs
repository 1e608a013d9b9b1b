//! 設定管理（環境変数ヘルパー）

use std::str::FromStr;

/// 環境変数を取得し、未設定ならデフォルト値を返す
pub fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// 環境変数をパースして取得し、未設定・パース失敗ならデフォルト値を返す
pub fn env_parse<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// スケジューラー設定
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// チェック間隔（秒）
    pub check_interval_secs: u64,
}

impl SchedulerConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Self {
        Self {
            check_interval_secs: env_parse("MONITOR_CHECK_INTERVAL", 300),
        }
    }
}
