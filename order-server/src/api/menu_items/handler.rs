//! Menu Item API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};

use crate::cache::QueryKey;
use crate::core::ServerState;
use crate::db::repository::{RepoError, menu_item};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, validate_amount,
    validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// Items shown on the landing showcase
const FEATURED_LIMIT: i64 = 8;

/// GET /api/menu-items - all items by name
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItem>>> {
    let pool = state.pool();
    let items = state
        .cache
        .get_or_fetch(QueryKey::MenuItems, || async {
            menu_item::find_all(pool).await.map_err(AppError::from)
        })
        .await?;
    Ok(Json(items))
}

/// GET /api/menu-items/available - flagged available with stock
pub async fn list_available(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItem>>> {
    let pool = state.pool();
    let items = state
        .cache
        .get_or_fetch(QueryKey::AvailableMenuItems, || async {
            menu_item::find_available(pool).await.map_err(AppError::from)
        })
        .await?;
    Ok(Json(items))
}

/// GET /api/menu-items/featured
pub async fn featured(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItem>>> {
    let pool = state.pool();
    let items = state
        .cache
        .get_or_fetch(QueryKey::FeaturedMenuItems, || async {
            menu_item::find_featured(pool, FEATURED_LIMIT)
                .await
                .map_err(AppError::from)
        })
        .await?;
    Ok(Json(items))
}

/// GET /api/menu-items/categories
pub async fn categories(State(state): State<ServerState>) -> AppResult<Json<Vec<String>>> {
    Ok(Json(crate::customer::categories(&state).await?))
}

#[derive(Debug, Deserialize)]
pub struct LowStockQuery {
    pub threshold: Option<i64>,
}

/// GET /api/menu-items/low-stock?threshold=5 - defaults to the configured cut-off
pub async fn low_stock(
    State(state): State<ServerState>,
    Query(query): Query<LowStockQuery>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let threshold = query.threshold.unwrap_or(state.config.low_stock_threshold);
    let items = menu_item::find_low_stock(state.pool(), threshold).await?;
    Ok(Json(items))
}

/// GET /api/menu-items/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MenuItem>> {
    let item = menu_item::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::menu_item_not_found(id))?;
    Ok(Json(item))
}

/// POST /api/menu-items
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_amount(payload.price, "price")?;
    if let Some(cost) = payload.cost {
        validate_amount(cost, "cost")?;
    }
    validate_common(
        &payload.description,
        &payload.barcode,
        &payload.image_url,
        &payload.category,
    )?;

    let item = menu_item::create(state.pool(), payload).await?;
    state.cache.invalidate(&QueryKey::MENU);
    tracing::info!(menu_item_id = item.id, name = %item.name, "Menu item created");
    Ok(Json(item))
}

/// PUT /api/menu-items/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(price) = payload.price {
        validate_amount(price, "price")?;
    }
    if let Some(cost) = payload.cost {
        validate_amount(cost, "cost")?;
    }
    validate_common(
        &payload.description,
        &payload.barcode,
        &payload.image_url,
        &payload.category,
    )?;

    let item = menu_item::update(state.pool(), id, payload)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => AppError::menu_item_not_found(id),
            other => other.into(),
        })?;
    state.cache.invalidate(&QueryKey::MENU);
    tracing::info!(menu_item_id = id, "Menu item updated");
    Ok(Json(item))
}

/// DELETE /api/menu-items/{id} - past order lines keep the id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = menu_item::delete(state.pool(), id).await?;
    if deleted {
        state.cache.invalidate(&QueryKey::MENU);
        tracing::info!(menu_item_id = id, "Menu item deleted");
    }
    Ok(Json(deleted))
}

fn validate_common(
    description: &Option<String>,
    barcode: &Option<String>,
    image_url: &Option<String>,
    category: &Option<String>,
) -> AppResult<()> {
    validate_optional_text(description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(barcode, "barcode", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(image_url, "image_url", MAX_URL_LEN)?;
    validate_optional_text(category, "category", MAX_SHORT_TEXT_LEN)?;
    Ok(())
}
