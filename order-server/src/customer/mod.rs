//! Customer self-order
//!
//! Reached without a staff token from the QR code printed on each table.
//! The URL segment is only used to default the table selection; the order
//! itself is placed against whatever table number the customer submits.

use serde::{Deserialize, Serialize};
use shared::models::{CustomerOrderCreate, MenuItem, Order, OrderStatus, TableStatus};
use sqlx::SqlitePool;

use crate::cache::QueryKey;
use crate::core::ServerState;
use crate::db::repository::order::NewOrder;
use crate::db::repository::{dining_table, menu_item, order};
use crate::orders::write_items_and_occupy;
use crate::utils::money::sum_subtotals;
use crate::utils::validation::{MAX_NOTE_LEN, validate_lines, validate_optional_text};
use crate::utils::{AppError, AppResult, ErrorCode};

/// `?search=burger&category=Mains`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuFilter {
    pub search: Option<String>,
    pub category: Option<String>,
}

impl MenuFilter {
    fn matches(&self, item: &MenuItem) -> bool {
        let search_ok = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                item.name.to_lowercase().contains(&term)
                    || item
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&term))
            }
        };
        let category_ok = match self.category.as_deref() {
            None | Some("") => true,
            Some(category) => item.category.as_deref() == Some(category),
        };
        search_ok && category_ok
    }
}

/// Table as shown on the customer page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerTable {
    pub id: i64,
    pub table_number: String,
    pub status: TableStatus,
    pub hall_name: Option<String>,
}

/// Orderable items (available with stock), filtered in memory
pub async fn menu(state: &ServerState, filter: &MenuFilter) -> AppResult<Vec<MenuItem>> {
    let pool = state.pool();
    let items: Vec<MenuItem> = state
        .cache
        .get_or_fetch(QueryKey::AvailableMenuItems, || async {
            menu_item::find_available(pool).await.map_err(AppError::from)
        })
        .await?;
    Ok(items.into_iter().filter(|i| filter.matches(i)).collect())
}

pub async fn categories(state: &ServerState) -> AppResult<Vec<String>> {
    let pool = state.pool();
    state
        .cache
        .get_or_fetch(QueryKey::MenuCategories, || async {
            menu_item::find_categories(pool).await.map_err(AppError::from)
        })
        .await
}

/// Resolve the QR path segment (a table id) so the page can preselect it
pub async fn resolve_table(pool: &SqlitePool, segment: &str) -> AppResult<CustomerTable> {
    let not_found = || {
        AppError::with_message(ErrorCode::TableNotFound, format!("Table {segment} not found"))
            .with_detail("table", segment)
    };
    let id: i64 = segment.trim().parse().map_err(|_| not_found())?;
    let table = dining_table::find_detail_by_id(pool, id)
        .await?
        .ok_or_else(not_found)?;
    Ok(CustomerTable {
        id: table.id,
        table_number: table.table_number,
        status: table.status,
        hall_name: table.hall_name,
    })
}

/// Place an order against an available table by its number
///
/// Unknown numbers and occupied or reserved tables are both
/// `TableUnavailable`. The total is the sum of the submitted subtotals.
pub async fn place_order(state: &ServerState, input: CustomerOrderCreate) -> AppResult<Order> {
    if input.items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }
    let table_number = input.table_number.trim();
    if table_number.is_empty() {
        return Err(AppError::new(ErrorCode::TableRequired));
    }
    validate_lines(&input.items)?;
    validate_optional_text(&input.notes, "notes", MAX_NOTE_LEN)?;
    let pool = state.pool();

    let table = dining_table::find_available_by_number(pool, table_number)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::TableUnavailable,
                format!("Table {table_number} is not available"),
            )
            .with_detail("table_number", table_number)
        })?;

    let order = order::insert(
        pool,
        NewOrder {
            table_id: Some(table.id),
            waiter_id: None,
            status: OrderStatus::Pending,
            total_amount: sum_subtotals(&input.items),
            notes: input.notes,
        },
    )
    .await?;

    let result = write_items_and_occupy(pool, &order, &input.items).await;
    state.cache.invalidate(&[
        QueryKey::Orders,
        QueryKey::UnpaidOrders,
        QueryKey::AvailableTables,
        QueryKey::Tables,
    ]);
    result?;

    tracing::info!(
        order_id = order.id,
        table_id = table.id,
        table_number = %table.table_number,
        items = input.items.len(),
        total = order.total_amount,
        "Customer order placed"
    );
    Ok(order)
}
