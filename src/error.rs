//! エラー型定義

use thiserror::Error;

/// サービスモニター全体のエラー型
#[derive(Debug, Error)]
pub enum MonitorError {
    /// 入力検証エラー（登録境界でのみ発生し、呼び出し元へ伝播する）
    #[error("validation error: {0}")]
    Validation(String),

    /// データベースエラー
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result型エイリアス
pub type MonitorResult<T> = Result<T, MonitorError>;
