//! テスト用サーバー起動ヘルパー

use service_monitor::health::ServiceChecker;
use service_monitor::scheduler::CheckScheduler;
use service_monitor::{api, AppState};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::SqlitePool;
use std::net::SocketAddr;
use std::str::FromStr;
use tempfile::TempDir;

/// テスト用に起動したモニターサーバー
pub struct TestServer {
    addr: SocketAddr,
    /// テストから直接レコードを仕込むためのプール
    #[allow(dead_code)]
    pub db_pool: SqlitePool,
    // プールが参照するDBファイルをテスト終了まで保持する
    _db_dir: TempDir,
}

impl TestServer {
    /// バインド先アドレス
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

/// テスト用のSQLiteデータベースプールを作成する
///
/// 並列書き込みを受けるためファイルベースで作成する。
pub async fn create_test_db_pool() -> (SqlitePool, TempDir) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let db_path = dir.path().join("monitor.db");
    let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path.display()))
        .expect("invalid sqlite url")
        .create_if_missing(true);

    let pool = SqlitePool::connect_with(options)
        .await
        .expect("Failed to create test database");

    // マイグレーションを実行
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    (pool, dir)
}

/// モニターサーバーをテスト用に起動する
pub async fn spawn_test_monitor() -> TestServer {
    let (db_pool, db_dir) = create_test_db_pool().await;

    let checker = ServiceChecker::new(db_pool.clone());
    let scheduler = CheckScheduler::new(checker.clone()).with_interval(1);

    let state = AppState {
        db_pool: db_pool.clone(),
        checker,
        scheduler,
    };

    let router = api::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("test server error");
    });

    TestServer {
        addr,
        db_pool,
        _db_dir: db_dir,
    }
}
