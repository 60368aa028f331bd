//! Repository Module
//!
//! Free-function CRUD over the SQLite pool, one module per table.
//! Every call is an independent statement: multi-step business flows
//! compose them without a shared transaction.

pub mod dining_table;
pub mod hall;
pub mod menu_item;
pub mod order;
pub mod order_item;
pub mod payment;
pub mod report;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err
            && db_err.is_unique_violation()
        {
            return RepoError::Duplicate(db_err.message().to_string());
        }
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

#[cfg(test)]
pub(crate) mod test_support {
    //! In-memory pool with the real schema plus small seed helpers

    use shared::models::{DiningTableCreate, HallCreate, MenuItemCreate};
    use sqlx::SqlitePool;

    pub async fn test_pool() -> SqlitePool {
        crate::db::DbService::in_memory().await.unwrap().pool
    }

    pub async fn seed_hall(pool: &SqlitePool, name: &str) -> i64 {
        super::hall::create(
            pool,
            HallCreate {
                name: name.to_string(),
                description: None,
                is_active: None,
            },
        )
        .await
        .unwrap()
        .id
    }

    pub async fn seed_table(pool: &SqlitePool, number: &str, hall_id: Option<i64>) -> i64 {
        super::dining_table::create(
            pool,
            DiningTableCreate {
                table_number: number.to_string(),
                capacity: Some(4),
                hall_id,
                status: None,
            },
        )
        .await
        .unwrap()
        .id
    }

    pub async fn seed_menu_item(pool: &SqlitePool, name: &str, price: f64, cost: f64) -> i64 {
        super::menu_item::create(
            pool,
            MenuItemCreate {
                name: name.to_string(),
                description: None,
                price,
                cost: Some(cost),
                barcode: None,
                image_url: None,
                category: Some("Mains".to_string()),
                stock_quantity: Some(50),
                is_available: Some(true),
            },
        )
        .await
        .unwrap()
        .id
    }
}
