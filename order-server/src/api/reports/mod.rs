//! Reporting API
//!
//! Every route takes `?period=today|week|month|year` or
//! `?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD` and requires `reports:view`.

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::{permissions, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reports", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/summary", get(handler::summary))
        .route("/top-items", get(handler::top_items))
        .route("/dashboard", get(handler::dashboard))
        .route("/recent-orders", get(handler::recent_orders))
        .route("/export/daily", get(handler::export_daily))
        .route("/export/orders", get(handler::export_orders))
        .layer(middleware::from_fn(require_permission(
            permissions::REPORTS_VIEW,
        )))
}
