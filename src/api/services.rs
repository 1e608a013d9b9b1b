//! サービス管理APIハンドラー

use super::error::AppError;
use crate::db;
use crate::error::MonitorError;
use crate::types::Service;
use crate::AppState;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use tracing::{error, info};

/// サービス登録リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateServicePayload {
    /// 表示名
    pub name: String,
    /// 監視対象URL
    pub url: String,
    /// サービス種別タグ
    #[serde(rename = "type")]
    pub service_type: String,
}

/// POST /services/ - サービス登録
///
/// name/urlが空の場合はストアに触れる前に400を返す。
pub async fn create_service(
    State(state): State<AppState>,
    Json(payload): Json<CreateServicePayload>,
) -> Result<Json<Service>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(MonitorError::Validation("service name must not be empty".to_string()).into());
    }
    if payload.url.trim().is_empty() {
        return Err(MonitorError::Validation("service url must not be empty".to_string()).into());
    }

    let service = db::services::create_service(
        &state.db_pool,
        &payload.name,
        &payload.url,
        &payload.service_type,
    )
    .await?;

    info!(service_id = service.id, name = %service.name, "Service registered");

    Ok(Json(service))
}

/// サービス一覧クエリパラメータ
#[derive(Debug, Deserialize)]
pub struct ListServicesQuery {
    /// 先頭からの読み飛ばし件数
    #[serde(default)]
    pub skip: i64,
    /// 最大取得件数
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

/// GET /services/ - サービス一覧取得（ID順）
///
/// ストア読み取り失敗は空リストに縮退する。
pub async fn list_services(
    State(state): State<AppState>,
    Query(query): Query<ListServicesQuery>,
) -> Json<Vec<Service>> {
    match db::services::list_services(&state.db_pool, query.skip, query.limit).await {
        Ok(services) => Json(services),
        Err(e) => {
            error!(error = %e, "Failed to list services");
            Json(Vec::new())
        }
    }
}
