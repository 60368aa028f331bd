//! Hall API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Hall, HallCreate, HallUpdate};

use crate::cache::QueryKey;
use crate::core::ServerState;
use crate::db::repository::{RepoError, hall};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// GET /api/halls - all halls by name
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Hall>>> {
    let pool = state.pool();
    let halls = state
        .cache
        .get_or_fetch(QueryKey::Halls, || async {
            hall::find_all(pool).await.map_err(AppError::from)
        })
        .await?;
    Ok(Json(halls))
}

/// GET /api/halls/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Hall>> {
    let hall = hall::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::hall_not_found(id))?;
    Ok(Json(hall))
}

/// POST /api/halls
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<HallCreate>,
) -> AppResult<Json<Hall>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let hall = hall::create(state.pool(), payload).await?;
    state.cache.invalidate(&[QueryKey::Halls]);
    tracing::info!(hall_id = hall.id, name = %hall.name, "Hall created");
    Ok(Json(hall))
}

/// PUT /api/halls/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<HallUpdate>,
) -> AppResult<Json<Hall>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let hall = hall::update(state.pool(), id, payload)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => AppError::hall_not_found(id),
            other => other.into(),
        })?;
    state.cache.invalidate(&[QueryKey::Halls]);
    tracing::info!(hall_id = id, "Hall updated");
    Ok(Json(hall))
}

/// DELETE /api/halls/{id} - tables in the hall are kept, detached
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = hall::delete(state.pool(), id).await?;
    if deleted {
        state.cache.invalidate(&[
            QueryKey::Halls,
            QueryKey::Tables,
            QueryKey::AvailableTables,
        ]);
        tracing::info!(hall_id = id, "Hall deleted");
    }
    Ok(Json(deleted))
}
