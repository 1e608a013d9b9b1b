//! チェックスケジューラー
//!
//! 固定間隔でチェックサイクルを起動する状態機械（stopped/running）

use crate::health::ServiceChecker;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// デフォルトのチェック間隔（秒）
const DEFAULT_CHECK_INTERVAL_SECS: u64 = 300;

/// スケジューラーの状態
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SchedulerState {
    /// タイマー稼働中
    Running,
    /// 停止中（初期状態）
    Stopped,
}

impl SchedulerState {
    /// SchedulerStateを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Stopped => "stopped",
        }
    }
}

impl std::fmt::Display for SchedulerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// トークンとタスクは必ず同時に生成・破棄される。
/// 片方だけSomeになる状態は存在しない。
struct SchedulerInner {
    cancel: Option<CancellationToken>,
    task: Option<JoinHandle<()>>,
}

/// チェックスケジューラー
///
/// インスタンスごとに独立した状態を持ち、start/stopは冪等。
/// 停止は以降のtickを取り消すだけで、実行中のサイクルは完走する。
#[derive(Clone)]
pub struct CheckScheduler {
    /// サイクル実行を委譲するチェッカー
    checker: ServiceChecker,
    /// チェック間隔（秒）
    interval_secs: u64,
    /// 状態（単一のロック配下でのみ遷移する）
    inner: Arc<Mutex<SchedulerInner>>,
}

impl CheckScheduler {
    /// 新しいスケジューラーを作成（初期状態はstopped）
    pub fn new(checker: ServiceChecker) -> Self {
        Self {
            checker,
            interval_secs: DEFAULT_CHECK_INTERVAL_SECS,
            inner: Arc::new(Mutex::new(SchedulerInner {
                cancel: None,
                task: None,
            })),
        }
    }

    /// チェック間隔を設定
    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs;
        self
    }

    /// タイマーを開始する
    ///
    /// すでに稼働中の場合は何もせず`false`を返す。
    pub async fn start(&self) -> bool {
        let mut inner = self.inner.lock().await;
        if inner.cancel.is_some() {
            return false;
        }

        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let checker = self.checker.clone();
        let interval_secs = self.interval_secs;

        let task = tokio::spawn(async move {
            let mut timer = interval(Duration::from_secs(interval_secs));
            // サイクルが間隔を超過してもtickを積み上げず、次回に繰り延べる
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // 最初のtickは即時発火するため読み捨てる。初回サイクルは1間隔後
            timer.tick().await;

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = timer.tick() => {
                        // サイクル実行中はキャンセルを観測しない（実行中サイクルは完走する）
                        checker.run_cycle().await;
                    }
                }
            }

            info!("Scheduler loop exited");
        });

        inner.cancel = Some(cancel);
        inner.task = Some(task);

        info!(interval_secs, "Scheduler started");
        true
    }

    /// タイマーを停止する
    ///
    /// 停止済みの場合は何もせず`false`を返す。
    /// 実行中のサイクルは中断されず、書き込みは通常どおり完了する。
    pub async fn stop(&self) -> bool {
        let mut inner = self.inner.lock().await;
        match inner.cancel.take() {
            Some(cancel) => {
                cancel.cancel();
                // タスクはサイクル完了後に自然終了するため、完了は待たない
                inner.task.take();
                info!("Scheduler stopped");
                true
            }
            None => false,
        }
    }

    /// 現在の状態を返す（副作用なし）
    pub async fn status(&self) -> SchedulerState {
        if self.inner.lock().await.cancel.is_some() {
            SchedulerState::Running
        } else {
            SchedulerState::Stopped
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::types::ServiceStatus;
    use chrono::Utc;
    use sqlx::sqlite::SqliteConnectOptions;
    use sqlx::SqlitePool;
    use std::str::FromStr;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup_test_db() -> (SqlitePool, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let db_path = dir.path().join("monitor.db");
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path.display()))
            .unwrap()
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .expect("Failed to create test database");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");
        (pool, dir)
    }

    async fn check_count(pool: &SqlitePool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM status_checks")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_scheduler_initial_state_is_stopped() {
        let (pool, _dir) = setup_test_db().await;
        let scheduler = CheckScheduler::new(ServiceChecker::new(pool));

        assert_eq!(scheduler.status().await, SchedulerState::Stopped);
    }

    #[tokio::test]
    async fn test_start_is_idempotent() {
        let (pool, _dir) = setup_test_db().await;
        let scheduler = CheckScheduler::new(ServiceChecker::new(pool));

        assert!(scheduler.start().await);
        // 2回目はタイマーを増やさずfalseを返す
        assert!(!scheduler.start().await);
        assert_eq!(scheduler.status().await, SchedulerState::Running);

        scheduler.stop().await;
    }

    #[tokio::test]
    async fn test_stop_is_idempotent() {
        let (pool, _dir) = setup_test_db().await;
        let scheduler = CheckScheduler::new(ServiceChecker::new(pool));

        assert!(!scheduler.stop().await);

        scheduler.start().await;
        assert!(scheduler.stop().await);
        assert!(!scheduler.stop().await);
        assert_eq!(scheduler.status().await, SchedulerState::Stopped);
    }

    #[tokio::test]
    async fn test_scheduler_runs_cycles_on_interval() {
        let (pool, _dir) = setup_test_db().await;
        db::services::create_service(&pool, "api", "http://127.0.0.1:9", "http")
            .await
            .unwrap();

        let scheduler =
            CheckScheduler::new(ServiceChecker::new(pool.clone())).with_interval(1);
        scheduler.start().await;

        // 初回サイクルは1間隔後に発火する
        tokio::time::sleep(Duration::from_millis(1500)).await;
        let after_first = check_count(&pool).await;
        assert!(after_first >= 1, "expected at least one cycle to have run");

        scheduler.stop().await;

        // 停止後はtickが発火しない
        tokio::time::sleep(Duration::from_millis(1500)).await;
        let after_stop = check_count(&pool).await;
        assert_eq!(after_stop, after_first);
    }

    #[tokio::test]
    async fn test_stop_does_not_cancel_inflight_cycle() {
        let (pool, _dir) = setup_test_db().await;

        // 応答に500ms要するサービスでサイクルを引き延ばす
        let mock = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&mock)
            .await;
        db::services::create_service(&pool, "slow", &mock.uri(), "http")
            .await
            .unwrap();

        let scheduler =
            CheckScheduler::new(ServiceChecker::new(pool.clone())).with_interval(1);
        scheduler.start().await;

        // サイクルがt=1sで開始し、プローブ完了はt=1.5s。その途中で停止する
        tokio::time::sleep(Duration::from_millis(1200)).await;
        scheduler.stop().await;
        assert_eq!(scheduler.status().await, SchedulerState::Stopped);

        // 実行中だったサイクルの書き込みは着地する
        tokio::time::sleep(Duration::from_millis(800)).await;
        let checks =
            db::status_checks::list_checks_since(&pool, 1, Utc::now() - chrono::Duration::hours(1))
                .await
                .unwrap();
        assert_eq!(checks.len(), 1);
        assert_eq!(checks[0].status, ServiceStatus::Up);
    }

    #[tokio::test]
    async fn test_scheduler_state_serialization() {
        assert_eq!(
            serde_json::to_string(&SchedulerState::Running).unwrap(),
            "\"running\""
        );
        assert_eq!(
            serde_json::to_string(&SchedulerState::Stopped).unwrap(),
            "\"stopped\""
        );
    }
}
