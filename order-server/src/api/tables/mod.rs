//! Dining Table API
//!
//! | Path | Method | Permission |
//! |------|--------|------------|
//! | /api/tables | GET | authenticated |
//! | /api/tables | POST | tables:manage |
//! | /api/tables/available | GET | authenticated |
//! | /api/tables/{id} | GET | authenticated |
//! | /api/tables/{id} | PUT, DELETE | tables:manage |
//! | /api/tables/{id}/status | PUT | tables:manage |
//! | /api/tables/{id}/qr | GET | authenticated |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::{permissions, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tables", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/available", get(handler::list_available))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/qr", get(handler::qr));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .route("/{id}/status", put(handler::set_status))
        .layer(middleware::from_fn(require_permission(
            permissions::TABLES_MANAGE,
        )));

    read_routes.merge(manage_routes)
}
