//! Payment capture
//!
//! Capture is three independent writes in this order:
//!
//! 1. payment row (amount = order total)
//! 2. order → completed, `completed_at` stamped
//! 3. table → available
//!
//! Nothing is rolled back. A failure at step 2 leaves a paid order that is
//! not completed; a failure at step 3 is logged and the capture still succeeds.
//! An existing payment does not block another one.

use serde::Serialize;
use shared::models::{
    Order, OrderStatus, OrderSummary, Payment, PaymentCreate, QuickCheckout,
};
use sqlx::SqlitePool;

use crate::auth::CurrentUser;
use crate::cache::QueryKey;
use crate::core::ServerState;
use crate::db::repository::order::NewOrder;
use crate::db::repository::payment::NewPayment;
use crate::db::repository::{order, payment};
use crate::orders::{
    ensure_table_exists, occupy_table, order_error, release_table, table_for, write_items,
};
use crate::utils::money::sum_subtotals;
use crate::utils::validation::{
    MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_cart, validate_optional_text,
};
use crate::utils::{AppError, AppResult};

/// Quick checkout result: the new order and its payment
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutReceipt {
    pub order: Order,
    pub payment: Payment,
}

pub async fn capture(
    state: &ServerState,
    input: PaymentCreate,
    cashier: Option<&CurrentUser>,
) -> AppResult<Payment> {
    validate_optional_text(
        &input.transaction_reference,
        "transaction_reference",
        MAX_SHORT_TEXT_LEN,
    )?;
    let pool = state.pool();
    let order_id = input.order_id;
    let order = order::find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| AppError::order_not_found(order_id))?;

    let payment = payment::insert(
        pool,
        NewPayment {
            order_id,
            amount: order.total_amount,
            payment_method: input.payment_method,
            cashier_id: cashier.map(|u| u.id.clone()),
            transaction_reference: input.transaction_reference,
        },
    )
    .await?;
    tracing::info!(
        order_id,
        payment_id = payment.id,
        amount = payment.amount,
        method = %payment.payment_method,
        "Payment captured"
    );

    let result = complete_and_release(pool, &order).await;
    state.cache.invalidate(&[
        QueryKey::UnpaidOrders,
        QueryKey::Orders,
        QueryKey::Tables,
        QueryKey::AvailableTables,
    ]);
    result?;
    Ok(payment)
}

async fn complete_and_release(pool: &SqlitePool, order: &Order) -> AppResult<()> {
    if let Err(e) = order::update_status(pool, order.id, OrderStatus::Completed).await {
        tracing::error!(
            order_id = order.id,
            error = %e,
            "Payment recorded but completing the order failed"
        );
        return Err(order_error(order.id, e));
    }
    tracing::info!(order_id = order.id, "Order completed by payment");

    if let Some(table_id) = order.table_id
        && let Err(e) = release_table(pool, table_id, order.id).await
    {
        tracing::warn!(
            order_id = order.id,
            table_id,
            error = %e,
            "Order paid and completed, table left as is"
        );
    }
    Ok(())
}

/// Active orders without any payment row, newest first (cached)
pub async fn unpaid_orders(state: &ServerState) -> AppResult<Vec<OrderSummary>> {
    let pool = state.pool();
    state
        .cache
        .get_or_fetch(QueryKey::UnpaidOrders, || async {
            order::find_unpaid(pool).await.map_err(AppError::from)
        })
        .await
}

/// POS checkout: order, lines and payment in one call
///
/// The order is left `pending` and its table occupied; being paid, it never
/// shows up as unpaid.
pub async fn quick_checkout(
    state: &ServerState,
    input: QuickCheckout,
    cashier: Option<&CurrentUser>,
) -> AppResult<CheckoutReceipt> {
    validate_cart(input.order_type, input.table_id, &input.items)?;
    validate_optional_text(&input.notes, "notes", MAX_NOTE_LEN)?;
    validate_optional_text(
        &input.transaction_reference,
        "transaction_reference",
        MAX_SHORT_TEXT_LEN,
    )?;
    let pool = state.pool();

    let table_id = table_for(input.order_type, input.table_id);
    if let Some(id) = table_id {
        ensure_table_exists(pool, id).await?;
    }
    let total = sum_subtotals(&input.items);
    let cashier_id = cashier.map(|u| u.id.clone());

    let order = order::insert(
        pool,
        NewOrder {
            table_id,
            waiter_id: cashier_id.clone(),
            status: OrderStatus::Pending,
            total_amount: total,
            notes: input.notes.clone(),
        },
    )
    .await?;

    let result = checkout_steps(pool, &order, &input, cashier_id).await;
    state.cache.invalidate(&[
        QueryKey::Orders,
        QueryKey::UnpaidOrders,
        QueryKey::AvailableTables,
    ]);
    let payment = result?;

    tracing::info!(
        order_id = order.id,
        payment_id = payment.id,
        total,
        "Quick checkout completed"
    );
    Ok(CheckoutReceipt { order, payment })
}

async fn checkout_steps(
    pool: &SqlitePool,
    order: &Order,
    input: &QuickCheckout,
    cashier_id: Option<String>,
) -> AppResult<Payment> {
    write_items(pool, order.id, &input.items).await?;

    let payment = payment::insert(
        pool,
        NewPayment {
            order_id: order.id,
            amount: order.total_amount,
            payment_method: input.payment_method,
            cashier_id,
            transaction_reference: input.transaction_reference.clone(),
        },
    )
    .await
    .map_err(|e| {
        tracing::error!(order_id = order.id, error = %e, "Checkout order written but payment failed");
        e
    })?;

    if let Some(table_id) = order.table_id {
        occupy_table(pool, table_id, order.id).await?;
    }
    Ok(payment)
}

/// Payments recorded against one order
pub async fn list_for_order(pool: &SqlitePool, order_id: i64) -> AppResult<Vec<Payment>> {
    order::find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| AppError::order_not_found(order_id))?;
    Ok(payment::find_by_order(pool, order_id).await?)
}
