//! Reporting API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use shared::models::{DashboardStats, OrderSummary, PeriodSummary, TopItem};

use crate::core::ServerState;
use crate::reports::{self, ExportRow, ReportQuery, ReportWindow};
use crate::utils::AppResult;
use crate::utils::time::now_in;

fn window(state: &ServerState, query: &ReportQuery) -> AppResult<ReportWindow> {
    let tz = state.config.timezone;
    query.resolve(now_in(tz).date_naive(), tz)
}

/// GET /api/reports/summary
pub async fn summary(
    State(state): State<ServerState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<PeriodSummary>> {
    let window = window(&state, &query)?;
    Ok(Json(
        reports::period_summary(state.pool(), &window.range).await?,
    ))
}

/// GET /api/reports/top-items
pub async fn top_items(
    State(state): State<ServerState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<Vec<TopItem>>> {
    let window = window(&state, &query)?;
    Ok(Json(reports::top_items(state.pool(), &window.range).await?))
}

/// GET /api/reports/dashboard
pub async fn dashboard(
    State(state): State<ServerState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<DashboardStats>> {
    let window = window(&state, &query)?;
    Ok(Json(reports::dashboard(&state, &window.range).await?))
}

/// GET /api/reports/recent-orders
pub async fn recent_orders(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<OrderSummary>>> {
    Ok(Json(reports::recent_orders(state.pool()).await?))
}

/// GET /api/reports/export/daily
pub async fn export_daily(
    State(state): State<ServerState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<Vec<ExportRow>>> {
    let window = window(&state, &query)?;
    let rows = reports::daily_export(state.pool(), &window, state.config.timezone).await?;
    tracing::info!(rows = rows.len(), first_day = %window.range.first_day, last_day = %window.range.last_day, "Daily export built");
    Ok(Json(rows))
}

/// GET /api/reports/export/orders
pub async fn export_orders(
    State(state): State<ServerState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<Vec<ExportRow>>> {
    let window = window(&state, &query)?;
    let rows = reports::orders_export(state.pool(), &window, state.config.timezone).await?;
    tracing::info!(rows = rows.len(), first_day = %window.range.first_day, last_day = %window.range.last_day, "Orders export built");
    Ok(Json(rows))
}
