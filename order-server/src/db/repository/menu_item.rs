//! Menu Item Repository

use super::{RepoError, RepoResult};
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, description, price, cost, barcode, image_url, category, stock_quantity, is_available, created_at, updated_at";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<MenuItem>> {
    let items = sqlx::query_as::<_, MenuItem>(&format!(
        "SELECT {COLUMNS} FROM menu_item ORDER BY name"
    ))
    .fetch_all(pool)
    .await?;
    Ok(items)
}

/// Orderable items: flagged available with stock above zero
pub async fn find_available(pool: &SqlitePool) -> RepoResult<Vec<MenuItem>> {
    let items = sqlx::query_as::<_, MenuItem>(&format!(
        "SELECT {COLUMNS} FROM menu_item WHERE is_available = 1 AND stock_quantity > 0 ORDER BY name"
    ))
    .fetch_all(pool)
    .await?;
    Ok(items)
}

/// Available items by name, capped (landing page showcase)
pub async fn find_featured(pool: &SqlitePool, limit: i64) -> RepoResult<Vec<MenuItem>> {
    let items = sqlx::query_as::<_, MenuItem>(&format!(
        "SELECT {COLUMNS} FROM menu_item WHERE is_available = 1 ORDER BY name LIMIT ?"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(items)
}

pub async fn find_low_stock(pool: &SqlitePool, threshold: i64) -> RepoResult<Vec<MenuItem>> {
    let items = sqlx::query_as::<_, MenuItem>(&format!(
        "SELECT {COLUMNS} FROM menu_item WHERE stock_quantity <= ? ORDER BY stock_quantity, name"
    ))
    .bind(threshold)
    .fetch_all(pool)
    .await?;
    Ok(items)
}

/// Distinct non-null categories, sorted
pub async fn find_categories(pool: &SqlitePool) -> RepoResult<Vec<String>> {
    let categories: Vec<String> = sqlx::query_scalar(
        "SELECT DISTINCT category FROM menu_item WHERE category IS NOT NULL AND category <> '' ORDER BY category",
    )
    .fetch_all(pool)
    .await?;
    Ok(categories)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<MenuItem>> {
    let item = sqlx::query_as::<_, MenuItem>(&format!(
        "SELECT {COLUMNS} FROM menu_item WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(item)
}

pub async fn count_all(pool: &SqlitePool) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_item")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn count_low_stock(pool: &SqlitePool, threshold: i64) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_item WHERE stock_quantity <= ?")
        .bind(threshold)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Insert a menu item. A missing barcode becomes `ITEM-{unix millis}`.
pub async fn create(pool: &SqlitePool, data: MenuItemCreate) -> RepoResult<MenuItem> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    let barcode = data
        .barcode
        .filter(|b| !b.trim().is_empty())
        .unwrap_or_else(|| crate::utils::codes::default_item_barcode(now));
    sqlx::query(
        "INSERT INTO menu_item (id, name, description, price, cost, barcode, image_url, category, stock_quantity, is_available, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(data.cost.unwrap_or(0.0))
    .bind(&barcode)
    .bind(&data.image_url)
    .bind(&data.category)
    .bind(data.stock_quantity.unwrap_or(0))
    .bind(data.is_available.unwrap_or(true))
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create menu item".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: MenuItemUpdate) -> RepoResult<MenuItem> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE menu_item SET name = COALESCE(?1, name), description = COALESCE(?2, description), price = COALESCE(?3, price), cost = COALESCE(?4, cost), barcode = COALESCE(?5, barcode), image_url = COALESCE(?6, image_url), category = COALESCE(?7, category), stock_quantity = COALESCE(?8, stock_quantity), is_available = COALESCE(?9, is_available), updated_at = ?10 WHERE id = ?11",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(data.cost)
    .bind(&data.barcode)
    .bind(&data.image_url)
    .bind(&data.category)
    .bind(data.stock_quantity)
    .bind(data.is_available)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu item {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Menu item {id} not found")))
}

/// Order lines keep their menu_item_id; reports show them without a name
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM menu_item WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
