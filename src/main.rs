//! Service Monitor Entry Point

use clap::Parser;
use service_monitor::cli::Cli;
use service_monitor::config::{env_or, env_parse, SchedulerConfig};
use service_monitor::{api, health, logging, scheduler, AppState};
use sqlx::sqlite::SqliteConnectOptions;
use std::str::FromStr;
use tracing::info;

#[derive(Clone)]
struct ServerConfig {
    host: String,
    port: u16,
}

impl ServerConfig {
    fn from_env() -> Self {
        let host = env_or("MONITOR_HOST", "0.0.0.0");
        let port = env_parse("MONITOR_PORT", 8000);
        Self { host, port }
    }

    fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[tokio::main]
async fn main() {
    // CLIをパース（-h/--helpと-V/--versionのみ）
    let _cli = Cli::parse();

    logging::init().expect("failed to initialize logging");
    let cfg = ServerConfig::from_env();
    run_server(cfg).await;
}

async fn init_db_pool(database_url: &str) -> sqlx::Result<sqlx::SqlitePool> {
    // SQLiteファイルはディレクトリが存在しないと作成できないため、先に作成しておく
    if let Some(path) = database_url.strip_prefix("sqlite:") {
        // `sqlite::memory:` のような特殊指定はスキップ
        if !path.starts_with(':') {
            // `sqlite://` 形式に備えてスラッシュを除去し、クエリ部分を除外
            let normalized = path.trim_start_matches("//");
            let path_without_params = normalized.split('?').next().unwrap_or(normalized);
            let db_path = std::path::Path::new(path_without_params);
            if let Some(parent) = db_path.parent() {
                if let Err(err) = std::fs::create_dir_all(parent) {
                    panic!(
                        "Failed to create database directory {}: {}",
                        parent.display(),
                        err
                    );
                }
            }
        }
    }

    let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    sqlx::SqlitePool::connect_with(connect_options).await
}

async fn run_server(config: ServerConfig) {
    info!("Service Monitor v{}", env!("CARGO_PKG_VERSION"));

    // データベース接続プールを最初に作成（他コンポーネントが依存）
    let database_url = std::env::var("MONITOR_DATABASE_URL").unwrap_or_else(|_| {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .expect("Failed to get home directory");
        format!("sqlite:{}/.service-monitor/monitor.db", home)
    });

    let db_pool = init_db_pool(&database_url)
        .await
        .expect("Failed to connect to database");

    // マイグレーションを実行
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");

    let checker = health::ServiceChecker::new(db_pool.clone());

    // スケジューラーは停止状態で生成し、自動起動しない（開始はAPI経由）
    let scheduler_config = SchedulerConfig::from_env();
    let scheduler = scheduler::CheckScheduler::new(checker.clone())
        .with_interval(scheduler_config.check_interval_secs);

    let state = AppState {
        db_pool,
        checker,
        scheduler,
    };

    let router = api::create_router(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind to address");

    info!("Service monitor listening on {}", bind_addr);

    axum::serve(listener, router).await.expect("Server error");
}
