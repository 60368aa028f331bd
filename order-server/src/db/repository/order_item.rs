//! Order Item Repository

use super::{RepoError, RepoResult};
use shared::models::{CartLine, OrderItem, OrderItemDetail};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, order_id, menu_item_id, quantity, unit_price, subtotal, notes, created_at";

/// Insert one line. The subtotal is stored exactly as supplied.
pub async fn insert(pool: &SqlitePool, order_id: i64, line: &CartLine) -> RepoResult<OrderItem> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO order_item (id, order_id, menu_item_id, quantity, unit_price, subtotal, notes, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(order_id)
    .bind(line.menu_item_id)
    .bind(line.quantity)
    .bind(line.unit_price)
    .bind(line.subtotal)
    .bind(&line.notes)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create order item".into()))
}

/// Insert lines one statement at a time
///
/// Stops at the first failure; lines already written stay.
pub async fn insert_all(
    pool: &SqlitePool,
    order_id: i64,
    lines: &[CartLine],
) -> RepoResult<Vec<OrderItem>> {
    let mut items = Vec::with_capacity(lines.len());
    for line in lines {
        items.push(insert(pool, order_id, line).await?);
    }
    Ok(items)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<OrderItem>> {
    let item = sqlx::query_as::<_, OrderItem>(&format!(
        "SELECT {COLUMNS} FROM order_item WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(item)
}

/// Lines of one order with menu names (None once the menu item is deleted)
pub async fn find_by_order(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<OrderItemDetail>> {
    let items = sqlx::query_as::<_, OrderItemDetail>(
        "SELECT oi.id, oi.order_id, oi.menu_item_id, m.name AS menu_item_name, oi.quantity, oi.unit_price, oi.subtotal, oi.notes, oi.created_at FROM order_item oi LEFT JOIN menu_item m ON m.id = oi.menu_item_id WHERE oi.order_id = ? ORDER BY oi.created_at, oi.id",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    Ok(items)
}
