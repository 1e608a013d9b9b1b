//! ヘルスチェック監視
//!
//! 単一サービスの到達性プローブと、全サービスの並列チェックサイクル

/// 到達性プローブ
pub mod prober;

/// チェックサイクル実行
pub mod checker;

pub use checker::ServiceChecker;
pub use prober::Prober;
