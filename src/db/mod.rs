//! データベースアクセス層
//!
//! SQLiteベースのデータ永続化

/// サービス管理
pub mod services;

/// ステータスチェック履歴
pub mod status_checks;
