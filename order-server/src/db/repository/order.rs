//! Order Repository

use super::{RepoError, RepoResult};
use shared::models::{Order, OrderStatus, OrderSummary};
use sqlx::SqlitePool;

const COLUMNS: &str =
    "id, table_id, waiter_id, status, total_amount, notes, created_at, updated_at, completed_at";

const SUMMARY_SELECT: &str = "SELECT o.id, o.table_id, t.table_number, h.name AS hall_name, o.waiter_id, o.status, o.total_amount, o.notes, o.created_at, o.updated_at, o.completed_at FROM orders o LEFT JOIN dining_table t ON t.id = o.table_id LEFT JOIN hall h ON h.id = t.hall_id";

/// Header row for a new order
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub table_id: Option<i64>,
    pub waiter_id: Option<String>,
    pub status: OrderStatus,
    pub total_amount: f64,
    pub notes: Option<String>,
}

pub async fn insert(pool: &SqlitePool, data: NewOrder) -> RepoResult<Order> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO orders (id, table_id, waiter_id, status, total_amount, notes, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(data.table_id)
    .bind(&data.waiter_id)
    .bind(data.status)
    .bind(data.total_amount)
    .bind(&data.notes)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create order".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(&format!("SELECT {COLUMNS} FROM orders WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(order)
}

pub async fn find_summary_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<OrderSummary>> {
    let order = sqlx::query_as::<_, OrderSummary>(&format!("{SUMMARY_SELECT} WHERE o.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(order)
}

/// All orders, newest first
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<OrderSummary>> {
    let orders = sqlx::query_as::<_, OrderSummary>(&format!(
        "{SUMMARY_SELECT} ORDER BY o.created_at DESC, o.id DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(orders)
}

pub async fn find_recent(pool: &SqlitePool, limit: i64) -> RepoResult<Vec<OrderSummary>> {
    let orders = sqlx::query_as::<_, OrderSummary>(&format!(
        "{SUMMARY_SELECT} ORDER BY o.created_at DESC, o.id DESC LIMIT ?"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(orders)
}

/// Active-status orders with no payment row, newest first
///
/// A completed order that never got a payment is neither listed here nor flagged.
pub async fn find_unpaid(pool: &SqlitePool) -> RepoResult<Vec<OrderSummary>> {
    let orders = sqlx::query_as::<_, OrderSummary>(&format!(
        "{SUMMARY_SELECT} WHERE o.status IN (?, ?, ?, ?) AND NOT EXISTS (SELECT 1 FROM payment p WHERE p.order_id = o.id) ORDER BY o.created_at DESC, o.id DESC"
    ))
    .bind(OrderStatus::ACTIVE[0])
    .bind(OrderStatus::ACTIVE[1])
    .bind(OrderStatus::ACTIVE[2])
    .bind(OrderStatus::ACTIVE[3])
    .fetch_all(pool)
    .await?;
    Ok(orders)
}

/// Completed orders created inside `[start, end)`, oldest first
pub async fn find_completed_between(
    pool: &SqlitePool,
    start: i64,
    end: i64,
) -> RepoResult<Vec<OrderSummary>> {
    let orders = sqlx::query_as::<_, OrderSummary>(&format!(
        "{SUMMARY_SELECT} WHERE o.status = ? AND o.created_at >= ? AND o.created_at < ? ORDER BY o.created_at, o.id"
    ))
    .bind(OrderStatus::Completed)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;
    Ok(orders)
}

pub async fn count_by_status(pool: &SqlitePool, status: OrderStatus) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE status = ?")
        .bind(status)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Set the status. `completed_at` is stamped only when the new status is completed.
pub async fn update_status(pool: &SqlitePool, id: i64, status: OrderStatus) -> RepoResult<Order> {
    let now = shared::util::now_millis();
    let rows = if status == OrderStatus::Completed {
        sqlx::query("UPDATE orders SET status = ?, updated_at = ?, completed_at = ? WHERE id = ?")
            .bind(status)
            .bind(now)
            .bind(now)
            .bind(id)
            .execute(pool)
            .await?
    } else {
        sqlx::query("UPDATE orders SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status)
            .bind(now)
            .bind(id)
            .execute(pool)
            .await?
    };
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
}
