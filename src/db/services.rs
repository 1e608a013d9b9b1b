//! サービステーブル操作

use crate::types::Service;
use sqlx::SqlitePool;

/// サービスを登録し、採番済みレコードを返す
pub async fn create_service(
    pool: &SqlitePool,
    name: &str,
    url: &str,
    service_type: &str,
) -> Result<Service, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO services (name, url, type)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(name)
    .bind(url)
    .bind(service_type)
    .execute(pool)
    .await?;

    Ok(Service {
        id: result.last_insert_rowid(),
        name: name.to_string(),
        url: url.to_string(),
        service_type: service_type.to_string(),
    })
}

/// サービス一覧をID順で取得（ページング付き）
pub async fn list_services(
    pool: &SqlitePool,
    offset: i64,
    limit: i64,
) -> Result<Vec<Service>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ServiceRow>(
        r#"
        SELECT id, name, url, type
        FROM services
        ORDER BY id
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
}

/// 全サービスをID順で取得（チェックサイクル用）
pub async fn list_all_services(pool: &SqlitePool) -> Result<Vec<Service>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ServiceRow>(
        r#"
        SELECT id, name, url, type
        FROM services
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
}

#[derive(sqlx::FromRow)]
struct ServiceRow {
    id: i64,
    name: String,
    url: String,
    #[sqlx(rename = "type")]
    service_type: String,
}

impl From<ServiceRow> for Service {
    fn from(row: ServiceRow) -> Self {
        Service {
            id: row.id,
            name: row.name,
            url: row.url,
            service_type: row.service_type,
        }
    }
}
