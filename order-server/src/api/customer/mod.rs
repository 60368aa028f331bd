//! Customer self-order API (public)
//!
//! | Path | Method |
//! |------|--------|
//! | /api/customer/menu | GET |
//! | /api/customer/categories | GET |
//! | /api/customer/tables/{id} | GET |
//! | /api/customer/orders | POST |

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use shared::models::{CustomerOrderCreate, MenuItem, Order};

use crate::core::ServerState;
use crate::customer::{self, CustomerTable, MenuFilter};
use crate::utils::AppResult;

pub fn router() -> Router<ServerState> {
    Router::new().nest(
        "/api/customer",
        Router::new()
            .route("/menu", get(menu))
            .route("/categories", get(categories))
            .route("/tables/{id}", get(table))
            .route("/orders", post(place_order)),
    )
}

async fn menu(
    State(state): State<ServerState>,
    Query(filter): Query<MenuFilter>,
) -> AppResult<Json<Vec<MenuItem>>> {
    Ok(Json(customer::menu(&state, &filter).await?))
}

async fn categories(State(state): State<ServerState>) -> AppResult<Json<Vec<String>>> {
    Ok(Json(customer::categories(&state).await?))
}

async fn table(
    State(state): State<ServerState>,
    Path(segment): Path<String>,
) -> AppResult<Json<CustomerTable>> {
    Ok(Json(customer::resolve_table(state.pool(), &segment).await?))
}

async fn place_order(
    State(state): State<ServerState>,
    Json(payload): Json<CustomerOrderCreate>,
) -> AppResult<Json<Order>> {
    Ok(Json(customer::place_order(&state, payload).await?))
}
