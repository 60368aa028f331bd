//! Report Repository
//!
//! Read-only aggregates over completed orders whose `created_at` falls in
//! `[start, end)`. Cost always joins the *current* `menu_item.cost`, so editing
//! a cost changes historical figures.

use super::RepoResult;
use shared::models::OrderStatus;
use sqlx::SqlitePool;

/// Raw revenue / cost sums for one period
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct PeriodTotals {
    pub revenue: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TopItemRow {
    pub menu_item_id: i64,
    pub name: Option<String>,
    pub quantity: i64,
    pub revenue: f64,
    pub cost: f64,
}

/// One order line of a completed order, priced at current cost
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ExportLine {
    pub order_id: i64,
    pub name: Option<String>,
    pub quantity: i64,
    pub unit_price: f64,
    pub line_cost: f64,
}

pub async fn period_totals(pool: &SqlitePool, start: i64, end: i64) -> RepoResult<PeriodTotals> {
    let totals = sqlx::query_as::<_, PeriodTotals>(
        "SELECT COALESCE(SUM(oi.subtotal), 0.0) AS revenue, COALESCE(SUM(oi.quantity * COALESCE(m.cost, 0.0)), 0.0) AS cost FROM order_item oi JOIN orders o ON o.id = oi.order_id LEFT JOIN menu_item m ON m.id = oi.menu_item_id WHERE o.status = ? AND o.created_at >= ? AND o.created_at < ?",
    )
    .bind(OrderStatus::Completed)
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await?;
    Ok(totals)
}

pub async fn completed_count(pool: &SqlitePool, start: i64, end: i64) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM orders WHERE status = ? AND created_at >= ? AND created_at < ?",
    )
    .bind(OrderStatus::Completed)
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Items grouped by menu item, quantity descending
pub async fn top_items(
    pool: &SqlitePool,
    start: i64,
    end: i64,
    limit: i64,
) -> RepoResult<Vec<TopItemRow>> {
    let rows = sqlx::query_as::<_, TopItemRow>(
        "SELECT oi.menu_item_id, m.name AS name, SUM(oi.quantity) AS quantity, COALESCE(SUM(oi.subtotal), 0.0) AS revenue, COALESCE(SUM(oi.quantity * COALESCE(m.cost, 0.0)), 0.0) AS cost FROM order_item oi JOIN orders o ON o.id = oi.order_id LEFT JOIN menu_item m ON m.id = oi.menu_item_id WHERE o.status = ? AND o.created_at >= ? AND o.created_at < ? GROUP BY oi.menu_item_id ORDER BY quantity DESC, oi.menu_item_id LIMIT ?",
    )
    .bind(OrderStatus::Completed)
    .bind(start)
    .bind(end)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// All lines of completed orders in the period, grouped by order
pub async fn export_lines(pool: &SqlitePool, start: i64, end: i64) -> RepoResult<Vec<ExportLine>> {
    let rows = sqlx::query_as::<_, ExportLine>(
        "SELECT oi.order_id, m.name AS name, oi.quantity, oi.unit_price, oi.quantity * COALESCE(m.cost, 0.0) AS line_cost FROM order_item oi JOIN orders o ON o.id = oi.order_id LEFT JOIN menu_item m ON m.id = oi.menu_item_id WHERE o.status = ? AND o.created_at >= ? AND o.created_at < ? ORDER BY oi.order_id, oi.created_at, oi.id",
    )
    .bind(OrderStatus::Completed)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
