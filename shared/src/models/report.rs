//! Report Models

use serde::{Deserialize, Serialize};

/// Revenue / cost / profit for completed orders in a period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub revenue: f64,
    /// Quantity × *current* menu item cost
    pub cost: f64,
    pub profit: f64,
    /// Percentage with one decimal; 0 when revenue is 0
    pub profit_margin: f64,
    pub completed_orders: i64,
}

/// Best seller row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopItem {
    pub menu_item_id: i64,
    /// "Unspecified" once the menu item is deleted
    pub name: String,
    pub quantity: i64,
    pub revenue: f64,
    pub cost: f64,
    pub profit: f64,
}

/// Management dashboard header
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_tables: i64,
    pub available_tables: i64,
    pub menu_items: i64,
    /// Orders still `pending`
    pub active_orders: i64,
    pub low_stock_items: i64,
    #[serde(flatten)]
    pub summary: PeriodSummary,
}
