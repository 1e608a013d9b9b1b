//! チェックサイクル実行
//!
//! 全登録サービスへの並列ファンアウトと結果の永続化

use crate::db;
use crate::health::prober::Prober;
use crate::types::ServiceStatus;
use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// サービスチェッカー
///
/// 1サイクル = 全登録サービスを並列にプローブし、サービスごとに
/// ステータスレコードを1件追記する。サイクル同士は内部ロックで直列化され、
/// タイマー経由と手動トリガーが重なっても同時には走らない。
#[derive(Clone)]
pub struct ServiceChecker {
    /// データベース接続プール
    pool: SqlitePool,
    /// 到達性プローバー
    prober: Prober,
    /// サイクル直列化ロック
    cycle_lock: Arc<Mutex<()>>,
}

impl ServiceChecker {
    /// 新しいチェッカーを作成
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            prober: Prober::new(),
            cycle_lock: Arc::new(Mutex::new(())),
        }
    }

    /// 1チェックサイクルを実行
    ///
    /// 全サービスのプローブ完了とレコード書き込み試行が終わるまで戻らない。
    /// 個々のプローブ失敗はDownレコードに、個々の書き込み失敗はログ出力と
    /// レコード破棄に縮退し、サイクル全体を中断しない。
    pub async fn run_cycle(&self) {
        let _guard = self.cycle_lock.lock().await;

        let services = match db::services::list_all_services(&self.pool).await {
            Ok(services) => services,
            Err(e) => {
                error!(error = %e, "Failed to load services, skipping check cycle");
                return;
            }
        };

        if services.is_empty() {
            debug!("No services registered, skipping check cycle");
            return;
        }

        debug!(count = services.len(), "Starting check cycle");

        let mut handles = Vec::with_capacity(services.len());

        for service in services {
            let checker = self.clone();
            handles.push(tokio::spawn(async move {
                let status = checker.prober.probe(&service).await;
                // タイムスタンプはチェック完了時点で確定
                let timestamp = Utc::now();

                if let Err(e) =
                    db::status_checks::insert_check(&checker.pool, service.id, status, timestamp)
                        .await
                {
                    warn!(
                        service_id = service.id,
                        error = %e,
                        "Failed to record status check, dropping record"
                    );
                }

                status
            }));
        }

        let mut up_count = 0;
        let mut down_count = 0;

        for handle in handles {
            match handle.await {
                Ok(ServiceStatus::Up) => up_count += 1,
                Ok(ServiceStatus::Down) => down_count += 1,
                Err(e) => {
                    error!("Check task join error: {}", e);
                }
            }
        }

        info!(up = up_count, down = down_count, "Check cycle completed");
    }
}
