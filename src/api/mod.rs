//! REST APIハンドラー
//!
//! サービス登録、ステータス履歴、スケジューラー操作API

pub mod error;
pub mod scheduler;
pub mod services;
pub mod status_checks;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// APIルーターを作成
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/testrun", get(scheduler::run_check_cycle))
        .route(
            "/services/",
            post(services::create_service).get(services::list_services),
        )
        .route("/status-checks/", post(status_checks::record_status))
        .route(
            "/status-checks/:service_id",
            get(status_checks::list_status_checks),
        )
        .route("/scheduler/start", post(scheduler::start_scheduler))
        .route("/scheduler/stop", post(scheduler::stop_scheduler))
        .route("/scheduler/status", get(scheduler::scheduler_status))
        // ダッシュボードは別オリジンから叩くため全許可
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /ping - 死活確認
async fn ping() -> &'static str {
    "pong"
}
