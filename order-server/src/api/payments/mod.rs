//! Payment API
//!
//! | Path | Method | Permission |
//! |------|--------|------------|
//! | /api/payments/unpaid | GET | authenticated |
//! | /api/payments | POST | payments:capture |
//! | /api/payments/quick-checkout | POST | payments:capture |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::{permissions, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/payments", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new().route("/unpaid", get(handler::unpaid));

    let capture_routes = Router::new()
        .route("/", post(handler::capture))
        .route("/quick-checkout", post(handler::quick_checkout))
        .layer(middleware::from_fn(require_permission(
            permissions::PAYMENTS_CAPTURE,
        )));

    read_routes.merge(capture_routes)
}
