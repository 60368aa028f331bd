//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use shared::models::{
    DiningTable, DiningTableCreate, DiningTableDetail, DiningTableUpdate, TableStatusUpdate,
};
use sqlx::SqlitePool;

use crate::cache::QueryKey;
use crate::core::ServerState;
use crate::db::repository::{RepoError, dining_table, hall};
use crate::utils::codes::table_qr_url;
use crate::utils::validation::{MAX_TABLE_NUMBER_LEN, validate_capacity, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};

const TABLE_KEYS: [QueryKey; 2] = [QueryKey::Tables, QueryKey::AvailableTables];

/// GET /api/tables - all tables by number, with hall name
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<DiningTableDetail>>> {
    let pool = state.pool();
    let tables = state
        .cache
        .get_or_fetch(QueryKey::Tables, || async {
            dining_table::find_all(pool).await.map_err(AppError::from)
        })
        .await?;
    Ok(Json(tables))
}

/// GET /api/tables/available
pub async fn list_available(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<DiningTableDetail>>> {
    let pool = state.pool();
    let tables = state
        .cache
        .get_or_fetch(QueryKey::AvailableTables, || async {
            dining_table::find_available(pool).await.map_err(AppError::from)
        })
        .await?;
    Ok(Json(tables))
}

/// GET /api/tables/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<DiningTableDetail>> {
    let table = dining_table::find_detail_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::table_not_found(id))?;
    Ok(Json(table))
}

/// POST /api/tables
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<Json<DiningTable>> {
    validate_required_text(&payload.table_number, "table_number", MAX_TABLE_NUMBER_LEN)?;
    if let Some(capacity) = payload.capacity {
        validate_capacity(capacity)?;
    }
    if let Some(hall_id) = payload.hall_id {
        ensure_hall_exists(state.pool(), hall_id).await?;
    }

    let number = payload.table_number.clone();
    let table = dining_table::create(state.pool(), payload)
        .await
        .map_err(|e| table_error(e, &number))?;
    state.cache.invalidate(&TABLE_KEYS);
    tracing::info!(table_id = table.id, table_number = %table.table_number, "Table created");
    Ok(Json(table))
}

/// PUT /api/tables/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<Json<DiningTable>> {
    if let Some(number) = &payload.table_number {
        validate_required_text(number, "table_number", MAX_TABLE_NUMBER_LEN)?;
    }
    if let Some(capacity) = payload.capacity {
        validate_capacity(capacity)?;
    }
    if let Some(hall_id) = payload.hall_id {
        ensure_hall_exists(state.pool(), hall_id).await?;
    }

    let number = payload.table_number.clone().unwrap_or_default();
    let table = dining_table::update(state.pool(), id, payload)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => AppError::table_not_found(id),
            other => table_error(other, &number),
        })?;
    state.cache.invalidate(&TABLE_KEYS);
    tracing::info!(table_id = id, "Table updated");
    Ok(Json(table))
}

/// PUT /api/tables/{id}/status - direct staff override, any status to any status
pub async fn set_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<TableStatusUpdate>,
) -> AppResult<Json<DiningTable>> {
    dining_table::set_status(state.pool(), id, payload.status)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => AppError::table_not_found(id),
            other => other.into(),
        })?;
    state.cache.invalidate(&TABLE_KEYS);
    tracing::info!(table_id = id, status = %payload.status, "Table status set");

    let table = dining_table::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::table_not_found(id))?;
    Ok(Json(table))
}

/// DELETE /api/tables/{id} - orders keep their table_id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = dining_table::delete(state.pool(), id).await?;
    if deleted {
        state.cache.invalidate(&TABLE_KEYS);
        tracing::info!(table_id = id, "Table deleted");
    }
    Ok(Json(deleted))
}

#[derive(Debug, Serialize)]
pub struct TableQr {
    pub table_id: i64,
    pub table_number: String,
    pub url: String,
}

/// GET /api/tables/{id}/qr - the URL to encode; rendering is the client's job
pub async fn qr(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Json<TableQr>> {
    let table = dining_table::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::table_not_found(id))?;
    Ok(Json(TableQr {
        table_id: table.id,
        url: table_qr_url(&state.config.public_base_url, table.id),
        table_number: table.table_number,
    }))
}

async fn ensure_hall_exists(pool: &SqlitePool, hall_id: i64) -> AppResult<()> {
    hall::find_by_id(pool, hall_id)
        .await?
        .ok_or_else(|| AppError::hall_not_found(hall_id))?;
    Ok(())
}

fn table_error(err: RepoError, table_number: &str) -> AppError {
    match err {
        RepoError::Duplicate(_) => AppError::with_message(
            ErrorCode::TableNumberExists,
            format!("Table number {table_number} already exists"),
        )
        .with_detail("table_number", table_number),
        other => other.into(),
    }
}
