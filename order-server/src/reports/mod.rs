//! Reporting
//!
//! Read-only aggregation over completed orders, recomputed on every request
//! and never cached. Cost uses the current menu item cost, so editing a cost
//! rewrites history on the next run.

mod export;
mod period;

pub use export::{ExportRow, daily_export, orders_export};
pub use period::{DateRange, Period, ReportQuery, ReportWindow};

use shared::models::{
    DashboardStats, OrderStatus, OrderSummary, PeriodSummary, TableStatus, TopItem,
};
use sqlx::SqlitePool;

use crate::core::ServerState;
use crate::db::repository::{dining_table, menu_item, order, report};
use crate::utils::money::{margin_percent, profit, round_money};
use crate::utils::AppResult;

/// Number of best sellers returned
pub const TOP_ITEMS_LIMIT: i64 = 5;

/// Number of orders on the dashboard's recent list
pub const RECENT_ORDERS_LIMIT: i64 = 15;

pub async fn period_summary(pool: &SqlitePool, range: &DateRange) -> AppResult<PeriodSummary> {
    summarize(pool, range.start, range.end).await
}

pub(crate) async fn summarize(pool: &SqlitePool, start: i64, end: i64) -> AppResult<PeriodSummary> {
    let totals = report::period_totals(pool, start, end).await?;
    let completed_orders = report::completed_count(pool, start, end).await?;
    let revenue = round_money(totals.revenue);
    let cost = round_money(totals.cost);
    let profit = profit(revenue, cost);
    Ok(PeriodSummary {
        revenue,
        cost,
        profit,
        profit_margin: margin_percent(profit, revenue),
        completed_orders,
    })
}

pub async fn top_items(pool: &SqlitePool, range: &DateRange) -> AppResult<Vec<TopItem>> {
    let rows = report::top_items(pool, range.start, range.end, TOP_ITEMS_LIMIT).await?;
    Ok(rows
        .into_iter()
        .map(|row| {
            let revenue = round_money(row.revenue);
            let cost = round_money(row.cost);
            TopItem {
                menu_item_id: row.menu_item_id,
                name: row.name.unwrap_or_else(|| "Unspecified".to_string()),
                quantity: row.quantity,
                revenue,
                cost,
                profit: profit(revenue, cost),
            }
        })
        .collect())
}

pub async fn dashboard(state: &ServerState, range: &DateRange) -> AppResult<DashboardStats> {
    let pool = state.pool();
    Ok(DashboardStats {
        total_tables: dining_table::count_all(pool).await?,
        available_tables: dining_table::count_by_status(pool, TableStatus::Available).await?,
        menu_items: menu_item::count_all(pool).await?,
        active_orders: order::count_by_status(pool, OrderStatus::Pending).await?,
        low_stock_items: menu_item::count_low_stock(pool, state.config.low_stock_threshold)
            .await?,
        summary: period_summary(pool, range).await?,
    })
}

pub async fn recent_orders(pool: &SqlitePool) -> AppResult<Vec<OrderSummary>> {
    Ok(order::find_recent(pool, RECENT_ORDERS_LIMIT).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::test_support::test_state;
    use crate::db::repository::test_support::{seed_menu_item, seed_table};
    use crate::orders::{create_order, update_status};
    use shared::models::{CartLine, MenuItemUpdate, OrderCreate, OrderType};

    fn everything() -> DateRange {
        DateRange {
            first_day: chrono::NaiveDate::MIN,
            last_day: chrono::NaiveDate::MAX,
            start: 0,
            end: i64::MAX,
        }
    }

    fn line(menu_item_id: i64, quantity: i64, unit_price: f64) -> CartLine {
        CartLine {
            menu_item_id,
            quantity,
            unit_price,
            subtotal: quantity as f64 * unit_price,
            notes: None,
        }
    }

    async fn completed(state: &ServerState, items: Vec<CartLine>) -> i64 {
        let order = create_order(
            state,
            OrderCreate {
                order_type: OrderType::Delivery,
                table_id: None,
                items,
                notes: None,
                total_amount: None,
            },
            None,
        )
        .await
        .unwrap();
        update_status(state, order.id, OrderStatus::Completed)
            .await
            .unwrap();
        order.id
    }

    #[tokio::test]
    async fn test_empty_period() {
        let state = test_state().await;
        let summary = period_summary(state.pool(), &everything()).await.unwrap();
        assert_eq!(summary, PeriodSummary::default());
        assert!(top_items(state.pool(), &everything()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_revenue_equals_sum_of_subtotals() {
        let state = test_state().await;
        let a = seed_menu_item(state.pool(), "A", 10.0, 4.0).await;
        let b = seed_menu_item(state.pool(), "B", 5.0, 2.0).await;
        completed(&state, vec![line(a, 2, 10.0), line(b, 1, 5.0)]).await;

        let summary = period_summary(state.pool(), &everything()).await.unwrap();
        assert_eq!(summary.revenue, 25.0);
        assert_eq!(summary.cost, 10.0);
        assert_eq!(summary.profit, 15.0);
        assert_eq!(summary.profit_margin, 60.0);
        assert_eq!(summary.completed_orders, 1);
    }

    #[tokio::test]
    async fn test_cost_edit_is_retroactive() {
        let state = test_state().await;
        let a = seed_menu_item(state.pool(), "A", 10.0, 4.0).await;
        completed(&state, vec![line(a, 2, 10.0)]).await;
        assert_eq!(
            period_summary(state.pool(), &everything()).await.unwrap().profit,
            12.0
        );

        menu_item::update(
            state.pool(),
            a,
            MenuItemUpdate {
                cost: Some(9.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let summary = period_summary(state.pool(), &everything()).await.unwrap();
        assert_eq!(summary.profit, 2.0);
        assert_eq!(summary.profit_margin, 10.0);
    }

    #[tokio::test]
    async fn test_top_items_truncated_to_five() {
        let state = test_state().await;
        let mut lines = Vec::new();
        for i in 1..=7 {
            let id = seed_menu_item(state.pool(), &format!("Item {i}"), 1.0, 0.5).await;
            lines.push(line(id, i, 1.0));
        }
        completed(&state, lines).await;

        let top = top_items(state.pool(), &everything()).await.unwrap();
        assert_eq!(top.len(), 5);
        assert_eq!(top[0].name, "Item 7");
        assert_eq!(top[0].quantity, 7);
        assert_eq!(top[0].profit, 3.5);
        assert_eq!(top[4].quantity, 3);
    }

    #[tokio::test]
    async fn test_dashboard_counts() {
        let state = test_state().await;
        let a = seed_menu_item(state.pool(), "A", 10.0, 4.0).await;
        seed_table(state.pool(), "T1", None).await;
        let t2 = seed_table(state.pool(), "T2", None).await;
        create_order(
            &state,
            OrderCreate {
                order_type: OrderType::DineIn,
                table_id: Some(t2),
                items: vec![line(a, 1, 10.0)],
                notes: None,
                total_amount: None,
            },
            None,
        )
        .await
        .unwrap();

        let stats = dashboard(&state, &everything()).await.unwrap();
        assert_eq!(stats.total_tables, 2);
        assert_eq!(stats.available_tables, 1);
        assert_eq!(stats.menu_items, 1);
        assert_eq!(stats.active_orders, 1);
        assert_eq!(stats.summary.revenue, 0.0);
        assert_eq!(recent_orders(state.pool()).await.unwrap().len(), 1);
    }
}
