//! ステータスチェック履歴テーブル操作

use crate::types::{ServiceStatus, StatusCheck};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

/// チェック結果を記録し、採番済みレコードを返す
///
/// タイムスタンプは呼び出し側がチェック完了時点で確定させたものを受け取る。
pub async fn insert_check(
    pool: &SqlitePool,
    service_id: i64,
    status: ServiceStatus,
    timestamp: DateTime<Utc>,
) -> Result<StatusCheck, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO status_checks (service_id, status, timestamp)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(service_id)
    .bind(status.as_str())
    .bind(timestamp.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(StatusCheck {
        id: result.last_insert_rowid(),
        service_id,
        status,
        timestamp,
    })
}

/// 指定サービスのチェック履歴をカットオフ以降に絞って新しい順で取得
pub async fn list_checks_since(
    pool: &SqlitePool,
    service_id: i64,
    cutoff: DateTime<Utc>,
) -> Result<Vec<StatusCheck>, sqlx::Error> {
    let rows = sqlx::query_as::<_, StatusCheckRow>(
        r#"
        SELECT id, service_id, status, timestamp
        FROM status_checks
        WHERE service_id = ? AND timestamp >= ?
        ORDER BY timestamp DESC
        "#,
    )
    .bind(service_id)
    .bind(cutoff.to_rfc3339())
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
}

#[derive(sqlx::FromRow)]
struct StatusCheckRow {
    id: i64,
    service_id: i64,
    status: String,
    timestamp: String,
}

impl From<StatusCheckRow> for StatusCheck {
    fn from(row: StatusCheckRow) -> Self {
        StatusCheck {
            id: row.id,
            service_id: row.service_id,
            status: row.status.parse().unwrap_or(ServiceStatus::Down),
            timestamp: DateTime::parse_from_rfc3339(&row.timestamp)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
        }
    }
}
