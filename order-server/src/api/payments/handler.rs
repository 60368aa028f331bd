//! Payment API Handlers

use axum::{Json, extract::State};
use shared::models::{OrderSummary, Payment, PaymentCreate, QuickCheckout};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::payments::{self, CheckoutReceipt};
use crate::utils::AppResult;

/// GET /api/payments/unpaid - active orders without a payment, newest first
pub async fn unpaid(State(state): State<ServerState>) -> AppResult<Json<Vec<OrderSummary>>> {
    Ok(Json(payments::unpaid_orders(&state).await?))
}

/// POST /api/payments - pay the full order total, complete it, free the table
pub async fn capture(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Json(payload): Json<PaymentCreate>,
) -> AppResult<Json<Payment>> {
    Ok(Json(
        payments::capture(&state, payload, Some(&current_user)).await?,
    ))
}

/// POST /api/payments/quick-checkout
pub async fn quick_checkout(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Json(payload): Json<QuickCheckout>,
) -> AppResult<Json<CheckoutReceipt>> {
    Ok(Json(
        payments::quick_checkout(&state, payload, Some(&current_user)).await?,
    ))
}
