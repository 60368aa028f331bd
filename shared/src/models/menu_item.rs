//! Menu Item Model

use serde::{Deserialize, Serialize};

/// Sellable menu item
///
/// `cost` only feeds profit reporting. `stock_quantity` is maintained by
/// operators; orders never decrement it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub cost: f64,
    pub barcode: Option<String>,
    pub image_url: Option<String>,
    /// Free-text category
    pub category: Option<String>,
    pub stock_quantity: i64,
    pub is_available: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl MenuItem {
    /// Orderable from the menu: flagged available and something in stock
    pub fn is_orderable(&self) -> bool {
        self.is_available && self.stock_quantity > 0
    }
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub cost: Option<f64>,
    pub barcode: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub stock_quantity: Option<i64>,
    pub is_available: Option<bool>,
}

/// Update menu item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub cost: Option<f64>,
    pub barcode: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub stock_quantity: Option<i64>,
    pub is_available: Option<bool>,
}
