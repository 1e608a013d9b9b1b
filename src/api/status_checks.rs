//! ステータスチェックAPIハンドラー

use super::error::AppError;
use crate::db;
use crate::types::{ServiceStatus, StatusCheck};
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{Duration, Utc};
use serde::Deserialize;
use tracing::error;

/// 手動ステータス登録リクエスト
#[derive(Debug, Deserialize)]
pub struct RecordStatusPayload {
    /// 対象サービスID
    pub service_id: i64,
    /// プローブ結果（"up" / "down"のみ受理）
    pub status: ServiceStatus,
}

/// POST /status-checks/ - ステータス手動登録
///
/// プローバーを経由しない挿入パス。タイムスタンプはサーバーが採時する。
pub async fn record_status(
    State(state): State<AppState>,
    Json(payload): Json<RecordStatusPayload>,
) -> Result<Json<StatusCheck>, AppError> {
    let check = db::status_checks::insert_check(
        &state.db_pool,
        payload.service_id,
        payload.status,
        Utc::now(),
    )
    .await?;

    Ok(Json(check))
}

/// チェック履歴クエリパラメータ
#[derive(Debug, Deserialize)]
pub struct StatusHistoryQuery {
    /// さかのぼる時間窓（時間単位）
    #[serde(default = "default_window_hours")]
    pub window_hours: i64,
}

fn default_window_hours() -> i64 {
    24
}

/// GET /status-checks/:service_id - チェック履歴取得
///
/// 直近の時間窓に入るレコードを新しい順で返す。未知のサービスIDは
/// エラーではなく空リスト。ストア読み取り失敗も空リストに縮退する。
pub async fn list_status_checks(
    State(state): State<AppState>,
    Path(service_id): Path<i64>,
    Query(query): Query<StatusHistoryQuery>,
) -> Json<Vec<StatusCheck>> {
    let cutoff = Utc::now() - Duration::hours(query.window_hours);

    match db::status_checks::list_checks_since(&state.db_pool, service_id, cutoff).await {
        Ok(checks) => Json(checks),
        Err(e) => {
            error!(service_id, error = %e, "Failed to list status checks");
            Json(Vec::new())
        }
    }
}
