//! サービス型定義
//!
//! 監視対象サービスとステータスチェック履歴のコアデータ型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// プローブ結果
///
/// 1回の到達性チェックは必ずこの2値のいずれかに確定する。
/// タイムアウト・接続失敗・HTTP 400以上はすべて`Down`に写像される。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    /// 到達可能（HTTPステータス400未満）
    Up,
    /// 到達不能（タイムアウト・接続失敗・HTTP 400以上）
    Down,
}

impl ServiceStatus {
    /// ServiceStatusを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl FromStr for ServiceStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "up" => Self::Up,
            // 不明な値はDown扱い（フェイルオープン方向）
            _ => Self::Down,
        })
    }
}

impl std::fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 監視対象サービス
///
/// 登録後は不変。IDはストアが採番する。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Service {
    /// 一意識別子（SQLiteが採番）
    pub id: i64,
    /// 表示名
    pub name: String,
    /// 監視対象URL（例: `http://192.168.1.10:8080/health`）
    pub url: String,
    /// サービス種別タグ（自由形式、例: "http", "api"）
    #[serde(rename = "type")]
    pub service_type: String,
}

/// ステータスチェック履歴
///
/// (サービス, チェックサイクル)ごとに1件生成される追記専用レコード。
/// タイムスタンプはチェック完了時点で確定する。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusCheck {
    /// 自動インクリメントID
    pub id: i64,
    /// 対象サービスID
    pub service_id: i64,
    /// プローブ結果
    pub status: ServiceStatus,
    /// チェック完了時刻
    pub timestamp: DateTime<Utc>,
}
