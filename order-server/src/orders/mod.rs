//! Order lifecycle
//!
//! Orders are created `pending`; staff may then set any status from any
//! status. Table side effects per action:
//!
//! | Action | Table status |
//! |--------|--------------|
//! | create with a table | occupied |
//! | status → cancelled | available |
//! | status → completed (status editor) | unchanged |
//! | payment capture | available (see [`crate::payments`]) |
//!
//! Every step is its own statement. A failure midway leaves the earlier
//! writes in place and is logged with the ids involved.

mod invoice;

pub use invoice::{Invoice, InvoiceLine, build_invoice};

use shared::models::{
    CartLine, Order, OrderCreate, OrderDetail, OrderStatus, OrderSummary, OrderType, TableStatus,
};
use sqlx::SqlitePool;

use crate::auth::CurrentUser;
use crate::cache::QueryKey;
use crate::core::ServerState;
use crate::db::repository::order::NewOrder;
use crate::db::repository::{RepoError, dining_table, order, order_item, payment};
use crate::utils::money::sum_subtotals;
use crate::utils::validation::{MAX_NOTE_LEN, validate_cart, validate_optional_text};
use crate::utils::{AppError, AppResult};

/// Staff order creation
///
/// `total_amount` defaults to the sum of the submitted subtotals. The table
/// must exist but its current status is not checked.
pub async fn create_order(
    state: &ServerState,
    input: OrderCreate,
    waiter: Option<&CurrentUser>,
) -> AppResult<Order> {
    validate_cart(input.order_type, input.table_id, &input.items)?;
    validate_optional_text(&input.notes, "notes", MAX_NOTE_LEN)?;
    let pool = state.pool();

    let table_id = table_for(input.order_type, input.table_id);
    if let Some(id) = table_id {
        ensure_table_exists(pool, id).await?;
    }

    let total_amount = match input.total_amount {
        Some(total) if !total.is_finite() => {
            return Err(AppError::validation("total_amount must be a finite number"));
        }
        Some(total) => total,
        None => sum_subtotals(&input.items),
    };

    let order = order::insert(
        pool,
        NewOrder {
            table_id,
            waiter_id: waiter.map(|u| u.id.clone()),
            status: OrderStatus::Pending,
            total_amount,
            notes: input.notes,
        },
    )
    .await?;

    let result = write_items_and_occupy(pool, &order, &input.items).await;
    state.cache.invalidate(&[
        QueryKey::Orders,
        QueryKey::UnpaidOrders,
        QueryKey::AvailableTables,
    ]);
    result?;

    tracing::info!(
        order_id = order.id,
        table_id = ?order.table_id,
        items = input.items.len(),
        total = order.total_amount,
        "Order created"
    );
    Ok(order)
}

/// Status editor: any status to any status
///
/// Cancelling releases the table. Completing here leaves the table as is;
/// payment capture is what frees it.
pub async fn update_status(
    state: &ServerState,
    order_id: i64,
    status: OrderStatus,
) -> AppResult<Order> {
    let pool = state.pool();
    let order = order::update_status(pool, order_id, status)
        .await
        .map_err(|e| order_error(order_id, e))?;
    tracing::info!(order_id, status = %status, "Order status changed");

    let result = match (status, order.table_id) {
        (OrderStatus::Cancelled, Some(table_id)) => release_table(pool, table_id, order_id).await,
        _ => Ok(()),
    };
    state.cache.invalidate(&[
        QueryKey::Orders,
        QueryKey::UnpaidOrders,
        QueryKey::Tables,
        QueryKey::AvailableTables,
    ]);
    result?;
    Ok(order)
}

/// All orders, newest first (cached)
pub async fn list(state: &ServerState) -> AppResult<Vec<OrderSummary>> {
    let pool = state.pool();
    state
        .cache
        .get_or_fetch(QueryKey::Orders, || async {
            order::find_all(pool).await.map_err(AppError::from)
        })
        .await
}

/// Order with its lines (menu names embedded) and payments
pub async fn get_detail(pool: &SqlitePool, order_id: i64) -> AppResult<OrderDetail> {
    let summary = order::find_summary_by_id(pool, order_id)
        .await?
        .ok_or_else(|| AppError::order_not_found(order_id))?;
    let items = order_item::find_by_order(pool, order_id).await?;
    let payments = payment::find_by_order(pool, order_id).await?;
    Ok(OrderDetail {
        order: summary,
        items,
        payments,
    })
}

pub async fn invoice(state: &ServerState, order_id: i64) -> AppResult<Invoice> {
    let detail = get_detail(state.pool(), order_id).await?;
    Ok(build_invoice(&detail, state.config.timezone))
}

// ========== Steps shared with payments and customer self-order ==========

/// Delivery orders never carry a table
pub(crate) fn table_for(order_type: OrderType, table_id: Option<i64>) -> Option<i64> {
    match order_type {
        OrderType::DineIn => table_id,
        OrderType::Delivery => None,
    }
}

pub(crate) async fn ensure_table_exists(pool: &SqlitePool, table_id: i64) -> AppResult<()> {
    dining_table::find_by_id(pool, table_id)
        .await?
        .ok_or_else(|| AppError::table_not_found(table_id))?;
    Ok(())
}

/// Insert the lines, then mark the order's table occupied
pub(crate) async fn write_items_and_occupy(
    pool: &SqlitePool,
    order: &Order,
    items: &[CartLine],
) -> AppResult<()> {
    write_items(pool, order.id, items).await?;
    if let Some(table_id) = order.table_id {
        occupy_table(pool, table_id, order.id).await?;
    }
    Ok(())
}

pub(crate) async fn write_items(pool: &SqlitePool, order_id: i64, items: &[CartLine]) -> AppResult<()> {
    order_item::insert_all(pool, order_id, items)
        .await
        .map_err(|e| {
            tracing::error!(
                order_id,
                error = %e,
                "Order header written but inserting its items failed"
            );
            e
        })?;
    Ok(())
}

/// Unconditional: an occupied or reserved table is overwritten
pub(crate) async fn occupy_table(pool: &SqlitePool, table_id: i64, order_id: i64) -> AppResult<()> {
    dining_table::set_status(pool, table_id, TableStatus::Occupied)
        .await
        .map_err(|e| {
            tracing::error!(
                order_id,
                table_id,
                error = %e,
                "Order written but marking its table occupied failed"
            );
            e
        })?;
    tracing::info!(order_id, table_id, "Table occupied");
    Ok(())
}

/// Set the table back to available
///
/// A table deleted after the order was placed is skipped with a warning.
pub(crate) async fn release_table(pool: &SqlitePool, table_id: i64, order_id: i64) -> AppResult<()> {
    match dining_table::set_status(pool, table_id, TableStatus::Available).await {
        Ok(()) => {
            tracing::info!(order_id, table_id, "Table released");
            Ok(())
        }
        Err(RepoError::NotFound(_)) => {
            tracing::warn!(order_id, table_id, "Order references a deleted table, nothing to release");
            Ok(())
        }
        Err(e) => {
            tracing::error!(order_id, table_id, error = %e, "Releasing table failed");
            Err(e.into())
        }
    }
}

pub(crate) fn order_error(order_id: i64, err: RepoError) -> AppError {
    match err {
        RepoError::NotFound(_) => AppError::order_not_found(order_id),
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::test_support::test_state;
    use crate::db::repository::test_support::{seed_menu_item, seed_table};
    use shared::error::ErrorCode;

    fn line(menu_item_id: i64, quantity: i64, unit_price: f64) -> CartLine {
        CartLine {
            menu_item_id,
            quantity,
            unit_price,
            subtotal: quantity as f64 * unit_price,
            notes: None,
        }
    }

    fn waiter() -> CurrentUser {
        CurrentUser {
            id: "w-7".into(),
            username: "waiter".into(),
            role: "waiter".into(),
            permissions: vec!["orders:write".into()],
        }
    }

    async fn table_status(state: &ServerState, id: i64) -> TableStatus {
        dining_table::find_by_id(state.pool(), id)
            .await
            .unwrap()
            .unwrap()
            .status
    }

    #[tokio::test]
    async fn test_create_order_occupies_table() {
        let state = test_state().await;
        let a = seed_menu_item(state.pool(), "A", 10.0, 4.0).await;
        let b = seed_menu_item(state.pool(), "B", 5.0, 2.0).await;
        let t1 = seed_table(state.pool(), "T1", None).await;

        let order = create_order(
            &state,
            OrderCreate {
                order_type: OrderType::DineIn,
                table_id: Some(t1),
                items: vec![line(a, 2, 10.0), line(b, 1, 5.0)],
                notes: None,
                total_amount: Some(25.0),
            },
            Some(&waiter()),
        )
        .await
        .unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_amount, 25.0);
        assert_eq!(order.waiter_id.as_deref(), Some("w-7"));
        assert_eq!(table_status(&state, t1).await, TableStatus::Occupied);

        let detail = get_detail(state.pool(), order.id).await.unwrap();
        let mut subtotals: Vec<f64> = detail.items.iter().map(|i| i.subtotal).collect();
        subtotals.sort_by(|x, y| x.total_cmp(y));
        assert_eq!(subtotals, vec![5.0, 20.0]);
    }

    #[tokio::test]
    async fn test_total_defaults_to_sum_of_subtotals() {
        let state = test_state().await;
        let a = seed_menu_item(state.pool(), "A", 3.3, 1.0).await;
        let order = create_order(
            &state,
            OrderCreate {
                order_type: OrderType::Delivery,
                table_id: None,
                items: vec![line(a, 3, 3.3)],
                notes: Some("ring twice".into()),
                total_amount: None,
            },
            None,
        )
        .await
        .unwrap();
        assert_eq!(order.total_amount, 9.9);
        assert_eq!(order.table_id, None);
    }

    #[tokio::test]
    async fn test_validation_happens_before_any_write() {
        let state = test_state().await;
        let a = seed_menu_item(state.pool(), "A", 10.0, 4.0).await;

        let err = create_order(
            &state,
            OrderCreate {
                order_type: OrderType::DineIn,
                table_id: None,
                items: vec![line(a, 1, 10.0)],
                notes: None,
                total_amount: None,
            },
            None,
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::TableRequired);

        let err = create_order(
            &state,
            OrderCreate {
                order_type: OrderType::DineIn,
                table_id: Some(404),
                items: vec![line(a, 1, 10.0)],
                notes: None,
                total_amount: None,
            },
            None,
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::TableNotFound);

        assert!(list(&state).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_occupied_table_is_not_rejected_for_staff() {
        let state = test_state().await;
        let a = seed_menu_item(state.pool(), "A", 10.0, 4.0).await;
        let t1 = seed_table(state.pool(), "T1", None).await;
        for _ in 0..2 {
            create_order(
                &state,
                OrderCreate {
                    order_type: OrderType::DineIn,
                    table_id: Some(t1),
                    items: vec![line(a, 1, 10.0)],
                    notes: None,
                    total_amount: None,
                },
                None,
            )
            .await
            .unwrap();
        }
        assert_eq!(list(&state).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_cancel_releases_table_but_complete_does_not() {
        let state = test_state().await;
        let a = seed_menu_item(state.pool(), "A", 10.0, 4.0).await;
        let t1 = seed_table(state.pool(), "T1", None).await;
        let t2 = seed_table(state.pool(), "T2", None).await;

        let mut ids = Vec::new();
        for table in [t1, t2] {
            let order = create_order(
                &state,
                OrderCreate {
                    order_type: OrderType::DineIn,
                    table_id: Some(table),
                    items: vec![line(a, 1, 10.0)],
                    notes: None,
                    total_amount: None,
                },
                None,
            )
            .await
            .unwrap();
            ids.push(order.id);
        }

        let cancelled = update_status(&state, ids[0], OrderStatus::Cancelled).await.unwrap();
        assert_eq!(cancelled.completed_at, None);
        assert_eq!(table_status(&state, t1).await, TableStatus::Available);

        let completed = update_status(&state, ids[1], OrderStatus::Completed).await.unwrap();
        assert!(completed.completed_at.is_some());
        assert_eq!(table_status(&state, t2).await, TableStatus::Occupied);
    }

    #[tokio::test]
    async fn test_cancel_with_deleted_table_succeeds() {
        let state = test_state().await;
        let a = seed_menu_item(state.pool(), "A", 10.0, 4.0).await;
        let t1 = seed_table(state.pool(), "T1", None).await;
        let order = create_order(
            &state,
            OrderCreate {
                order_type: OrderType::DineIn,
                table_id: Some(t1),
                items: vec![line(a, 1, 10.0)],
                notes: None,
                total_amount: None,
            },
            None,
        )
        .await
        .unwrap();
        dining_table::delete(state.pool(), t1).await.unwrap();

        let order = update_status(&state, order.id, OrderStatus::Cancelled).await.unwrap();
        assert_eq!(order.status, OrderStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_unknown_order() {
        let state = test_state().await;
        let err = update_status(&state, 99, OrderStatus::Ready).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderNotFound);
        let err = get_detail(state.pool(), 99).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderNotFound);
    }

    #[tokio::test]
    async fn test_order_list_is_cached_until_a_write() {
        let state = test_state().await;
        let a = seed_menu_item(state.pool(), "A", 10.0, 4.0).await;
        assert!(list(&state).await.unwrap().is_empty());

        // Written behind the cache's back: still stale
        order::insert(
            state.pool(),
            NewOrder {
                table_id: None,
                waiter_id: None,
                status: OrderStatus::Pending,
                total_amount: 1.0,
                notes: None,
            },
        )
        .await
        .unwrap();
        assert!(list(&state).await.unwrap().is_empty());

        create_order(
            &state,
            OrderCreate {
                order_type: OrderType::Delivery,
                table_id: None,
                items: vec![line(a, 1, 10.0)],
                notes: None,
                total_amount: None,
            },
            None,
        )
        .await
        .unwrap();
        assert_eq!(list(&state).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unpaid_list_follows_create_and_cancel() {
        let state = test_state().await;
        let a = seed_menu_item(state.pool(), "A", 10.0, 4.0).await;
        let t1 = seed_table(state.pool(), "T1", None).await;
        assert!(crate::payments::unpaid_orders(&state).await.unwrap().is_empty());

        let order = create_order(
            &state,
            OrderCreate {
                order_type: OrderType::DineIn,
                table_id: Some(t1),
                items: vec![line(a, 1, 10.0)],
                notes: None,
                total_amount: None,
            },
            Some(&waiter()),
        )
        .await
        .unwrap();
        let unpaid = crate::payments::unpaid_orders(&state).await.unwrap();
        assert_eq!(unpaid.len(), 1);
        assert_eq!(unpaid[0].id, order.id);

        update_status(&state, order.id, OrderStatus::Cancelled).await.unwrap();
        assert!(crate::payments::unpaid_orders(&state).await.unwrap().is_empty());
    }
}
