//! Hall Repository

use super::{RepoError, RepoResult};
use shared::models::{Hall, HallCreate, HallUpdate};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, description, is_active, created_at";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Hall>> {
    let halls = sqlx::query_as::<_, Hall>(&format!("SELECT {COLUMNS} FROM hall ORDER BY name"))
        .fetch_all(pool)
        .await?;
    Ok(halls)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Hall>> {
    let hall = sqlx::query_as::<_, Hall>(&format!("SELECT {COLUMNS} FROM hall WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(hall)
}

pub async fn create(pool: &SqlitePool, data: HallCreate) -> RepoResult<Hall> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO hall (id, name, description, is_active, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.is_active.unwrap_or(true))
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create hall".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: HallUpdate) -> RepoResult<Hall> {
    let rows = sqlx::query(
        "UPDATE hall SET name = COALESCE(?1, name), description = COALESCE(?2, description), is_active = COALESCE(?3, is_active) WHERE id = ?4",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.is_active)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Hall {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Hall {id} not found")))
}

/// Tables in the hall survive with `hall_id = NULL` (ON DELETE SET NULL)
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM hall WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
