//! Dining Table Repository

use super::{RepoError, RepoResult};
use shared::models::{
    DiningTable, DiningTableCreate, DiningTableDetail, DiningTableUpdate, TableStatus,
};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, table_number, capacity, status, hall_id, created_at";

const DETAIL_SELECT: &str = "SELECT t.id, t.table_number, t.capacity, t.status, t.hall_id, h.name AS hall_name, t.created_at FROM dining_table t LEFT JOIN hall h ON h.id = t.hall_id";

/// Default seats for a new table
pub const DEFAULT_CAPACITY: i32 = 4;

/// All tables ordered by number, with hall name
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<DiningTableDetail>> {
    let tables = sqlx::query_as::<_, DiningTableDetail>(&format!(
        "{DETAIL_SELECT} ORDER BY t.table_number"
    ))
    .fetch_all(pool)
    .await?;
    Ok(tables)
}

pub async fn find_available(pool: &SqlitePool) -> RepoResult<Vec<DiningTableDetail>> {
    let tables = sqlx::query_as::<_, DiningTableDetail>(&format!(
        "{DETAIL_SELECT} WHERE t.status = ? ORDER BY t.table_number"
    ))
    .bind(TableStatus::Available)
    .fetch_all(pool)
    .await?;
    Ok(tables)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<DiningTable>> {
    let table = sqlx::query_as::<_, DiningTable>(&format!(
        "SELECT {COLUMNS} FROM dining_table WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(table)
}

pub async fn find_detail_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<DiningTableDetail>> {
    let table = sqlx::query_as::<_, DiningTableDetail>(&format!("{DETAIL_SELECT} WHERE t.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(table)
}

/// Exact number match restricted to available tables (customer self-order)
pub async fn find_available_by_number(
    pool: &SqlitePool,
    table_number: &str,
) -> RepoResult<Option<DiningTable>> {
    let table = sqlx::query_as::<_, DiningTable>(&format!(
        "SELECT {COLUMNS} FROM dining_table WHERE table_number = ? AND status = ? LIMIT 1"
    ))
    .bind(table_number)
    .bind(TableStatus::Available)
    .fetch_optional(pool)
    .await?;
    Ok(table)
}

pub async fn count_all(pool: &SqlitePool) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM dining_table")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn count_by_status(pool: &SqlitePool, status: TableStatus) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM dining_table WHERE status = ?")
        .bind(status)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn create(pool: &SqlitePool, data: DiningTableCreate) -> RepoResult<DiningTable> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO dining_table (id, table_number, capacity, status, hall_id, created_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(&data.table_number)
    .bind(data.capacity.unwrap_or(DEFAULT_CAPACITY))
    .bind(data.status.unwrap_or_default())
    .bind(data.hall_id)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create dining table".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: DiningTableUpdate) -> RepoResult<DiningTable> {
    let rows = sqlx::query(
        "UPDATE dining_table SET table_number = COALESCE(?1, table_number), capacity = COALESCE(?2, capacity), hall_id = COALESCE(?3, hall_id), status = COALESCE(?4, status) WHERE id = ?5",
    )
    .bind(&data.table_number)
    .bind(data.capacity)
    .bind(data.hall_id)
    .bind(data.status)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Table {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Table {id} not found")))
}

/// Unconditional status write. No check of the previous status.
pub async fn set_status(pool: &SqlitePool, id: i64, status: TableStatus) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE dining_table SET status = ? WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Table {id} not found")));
    }
    Ok(())
}

/// Orders referencing the table keep their (now dangling) table_id
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM dining_table WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::{seed_hall, seed_table, test_pool};

    #[tokio::test]
    async fn test_create_defaults() {
        let pool = test_pool().await;
        let table = create(
            &pool,
            DiningTableCreate {
                table_number: "T1".into(),
                capacity: None,
                hall_id: None,
                status: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(table.capacity, DEFAULT_CAPACITY);
        assert_eq!(table.status, TableStatus::Available);
        assert_eq!(table.hall_id, None);
    }

    #[tokio::test]
    async fn test_duplicate_number_is_rejected() {
        let pool = test_pool().await;
        seed_table(&pool, "T1", None).await;
        let err = create(
            &pool,
            DiningTableCreate {
                table_number: "T1".into(),
                capacity: None,
                hall_id: None,
                status: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_find_all_embeds_hall_and_orders_by_number() {
        let pool = test_pool().await;
        let hall = seed_hall(&pool, "Terrace").await;
        seed_table(&pool, "T2", Some(hall)).await;
        seed_table(&pool, "T1", None).await;

        let tables = find_all(&pool).await.unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].table_number, "T1");
        assert_eq!(tables[0].hall_name, None);
        assert_eq!(tables[1].hall_name.as_deref(), Some("Terrace"));
    }

    #[tokio::test]
    async fn test_available_lookup_by_number() {
        let pool = test_pool().await;
        let t1 = seed_table(&pool, "T1", None).await;
        seed_table(&pool, "T2", None).await;
        set_status(&pool, t1, TableStatus::Occupied).await.unwrap();

        assert!(find_available_by_number(&pool, "T1").await.unwrap().is_none());
        assert!(find_available_by_number(&pool, "T2").await.unwrap().is_some());
        assert!(find_available_by_number(&pool, "T9").await.unwrap().is_none());

        let available = find_available(&pool).await.unwrap();
        assert_eq!(available.len(), 1);
        assert_eq!(count_by_status(&pool, TableStatus::Occupied).await.unwrap(), 1);
        assert_eq!(count_all(&pool).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_set_status_missing_table() {
        let pool = test_pool().await;
        let err = set_status(&pool, 42, TableStatus::Occupied).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_partial() {
        let pool = test_pool().await;
        let id = seed_table(&pool, "T1", None).await;
        let updated = update(
            &pool,
            id,
            DiningTableUpdate {
                capacity: Some(8),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.capacity, 8);
        assert_eq!(updated.table_number, "T1");
    }
}
