//! スケジューラー操作APIハンドラー

use crate::AppState;
use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

/// POST /scheduler/start - スケジューラー開始（冪等）
pub async fn start_scheduler(State(state): State<AppState>) -> Json<Value> {
    if state.scheduler.start().await {
        Json(json!({"message": "Scheduler started"}))
    } else {
        Json(json!({"message": "Scheduler is already running"}))
    }
}

/// POST /scheduler/stop - スケジューラー停止（冪等）
///
/// 実行中のサイクルは中断されない。
pub async fn stop_scheduler(State(state): State<AppState>) -> Json<Value> {
    if state.scheduler.stop().await {
        Json(json!({"message": "Scheduler stopped"}))
    } else {
        Json(json!({"message": "Scheduler is not running"}))
    }
}

/// GET /scheduler/status - スケジューラー状態取得
pub async fn scheduler_status(State(state): State<AppState>) -> Json<Value> {
    Json(json!({"status": state.scheduler.status().await}))
}

/// GET /testrun - チェックサイクル手動実行
///
/// タイマーを経由せず1サイクルを同期実行する。タイマー駆動のサイクルとは
/// チェッカー内部のロックで直列化される。
pub async fn run_check_cycle(State(state): State<AppState>) -> Json<Value> {
    state.checker.run_cycle().await;
    Json(json!({"message": "Check cycle completed"}))
}
