//! Payment Repository

use super::{RepoError, RepoResult};
use shared::models::{Payment, PaymentMethod};
use sqlx::SqlitePool;

const COLUMNS: &str =
    "id, order_id, amount, payment_method, cashier_id, transaction_reference, created_at";

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub order_id: i64,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    pub cashier_id: Option<String>,
    pub transaction_reference: Option<String>,
}

/// Insert a payment row. Existing payments on the same order are not checked.
pub async fn insert(pool: &SqlitePool, data: NewPayment) -> RepoResult<Payment> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO payment (id, order_id, amount, payment_method, cashier_id, transaction_reference, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(data.order_id)
    .bind(data.amount)
    .bind(data.payment_method)
    .bind(&data.cashier_id)
    .bind(&data.transaction_reference)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create payment".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Payment>> {
    let payment = sqlx::query_as::<_, Payment>(&format!("SELECT {COLUMNS} FROM payment WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(payment)
}

pub async fn find_by_order(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<Payment>> {
    let payments = sqlx::query_as::<_, Payment>(&format!(
        "SELECT {COLUMNS} FROM payment WHERE order_id = ? ORDER BY created_at, id"
    ))
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    Ok(payments)
}
