//! サービス到達性プローブ
//!
//! 1サービスに対する単発の到達性チェック

use crate::types::{Service, ServiceStatus};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// プローブのタイムアウト（秒）
const PROBE_TIMEOUT_SECS: u64 = 10;

/// サービス到達性プローバー
///
/// 結果写像の規約: HTTPステータス400未満のレスポンス → `Up`、
/// それ以外（400以上・タイムアウト・接続失敗・トランスポートエラー）→ `Down`。
/// `probe`は全入力に対して必ずどちらかの結果を返し、エラーを伝播しない。
/// 1対象の到達不能がバッチ全体を中断させないための規約である。
#[derive(Clone)]
pub struct Prober {
    /// HTTPクライアント（タイムアウト設定済み）
    client: Client,
}

impl Prober {
    /// 新しいプローバーを作成
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(PROBE_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// 単一サービスの到達性をチェック
    pub async fn probe(&self, service: &Service) -> ServiceStatus {
        match self.client.get(&service.url).send().await {
            Ok(response) if response.status().as_u16() < 400 => {
                debug!(
                    service_id = service.id,
                    status = %response.status(),
                    "Probe succeeded"
                );
                ServiceStatus::Up
            }
            Ok(response) => {
                debug!(
                    service_id = service.id,
                    status = %response.status(),
                    "Probe returned error status"
                );
                ServiceStatus::Down
            }
            Err(e) => {
                debug!(service_id = service.id, error = %e, "Probe failed");
                ServiceStatus::Down
            }
        }
    }
}

impl Default for Prober {
    fn default() -> Self {
        Self::new()
    }
}
