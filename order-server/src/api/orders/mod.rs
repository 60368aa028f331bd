//! Order API
//!
//! | Path | Method | Permission |
//! |------|--------|------------|
//! | /api/orders | GET | authenticated |
//! | /api/orders | POST | orders:write |
//! | /api/orders/{id} | GET | authenticated |
//! | /api/orders/{id}/invoice | GET | authenticated |
//! | /api/orders/{id}/payments | GET | authenticated |
//! | /api/orders/{id}/status | PUT | orders:write |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::{permissions, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/invoice", get(handler::invoice))
        .route("/{id}/payments", get(handler::payments));

    let write_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}/status", put(handler::update_status))
        .layer(middleware::from_fn(require_permission(
            permissions::ORDERS_WRITE,
        )));

    read_routes.merge(write_routes)
}
