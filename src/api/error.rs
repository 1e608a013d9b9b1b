//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use crate::error::MonitorError;
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::error;

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub MonitorError);

impl From<MonitorError> for AppError {
    fn from(err: MonitorError) -> Self {
        AppError(err)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError(MonitorError::Database(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self.0 {
            MonitorError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            MonitorError::Database(e) => {
                // 内部詳細はクライアントへ出さず、ログにのみ残す
                error!(error = %e, "Database error in API handler");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal database error".to_string(),
                )
            }
        };

        let payload = json!({
            "error": message
        });

        (status, Json(payload)).into_response()
    }
}
