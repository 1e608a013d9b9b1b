//! ロギング初期化ユーティリティ

use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

/// tracingサブスクライバーを初期化する
///
/// ログレベルは`MONITOR_LOG_LEVEL`（未設定時はinfo）で制御する。
pub fn init() -> Result<(), TryInitError> {
    let level = crate::config::env_or("MONITOR_LOG_LEVEL", "info");
    let filter = EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .finish()
        .try_init()
}
