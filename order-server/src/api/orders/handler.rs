//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Order, OrderCreate, OrderDetail, OrderStatusUpdate, OrderSummary, Payment};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::orders::{self, Invoice};
use crate::payments;
use crate::utils::AppResult;

/// GET /api/orders - newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<OrderSummary>>> {
    Ok(Json(orders::list(&state).await?))
}

/// GET /api/orders/{id} - header, lines and payments
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderDetail>> {
    Ok(Json(orders::get_detail(state.pool(), id).await?))
}

/// POST /api/orders - the caller becomes the waiter
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    let order = orders::create_order(&state, payload, Some(&current_user)).await?;
    Ok(Json(order))
}

/// PUT /api/orders/{id}/status
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<Order>> {
    Ok(Json(orders::update_status(&state, id, payload.status).await?))
}

/// GET /api/orders/{id}/invoice
pub async fn invoice(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Invoice>> {
    Ok(Json(orders::invoice(&state, id).await?))
}

/// GET /api/orders/{id}/payments
pub async fn payments(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<Payment>>> {
    Ok(Json(payments::list_for_order(state.pool(), id).await?))
}
