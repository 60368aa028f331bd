//! Order Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::payment::Payment;

/// Order status
///
/// Transitions are unconstrained: staff may set any status from any status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Served,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Non-terminal states. Orders here without a payment row are "unpaid".
    pub const ACTIVE: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Served,
    ];

    pub fn is_active(&self) -> bool {
        Self::ACTIVE.contains(self)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::Served => "served",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "preparing" => Ok(Self::Preparing),
            "ready" => Ok(Self::Ready),
            "served" => Ok(Self::Served),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

/// Dine-in orders need a table; delivery orders carry none
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    #[default]
    DineIn,
    Delivery,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    /// None ⇒ delivery / no-table order. May dangle after the table is deleted.
    pub table_id: Option<i64>,
    pub waiter_id: Option<String>,
    pub status: OrderStatus,
    /// Independently settable; expected to equal the sum of item subtotals
    pub total_amount: f64,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    /// Set only on transition to completed
    pub completed_at: Option<i64>,
}

/// Order joined with table number and hall name (list views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderSummary {
    pub id: i64,
    pub table_id: Option<i64>,
    pub table_number: Option<String>,
    pub hall_name: Option<String>,
    pub waiter_id: Option<String>,
    pub status: OrderStatus,
    pub total_amount: f64,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    pub completed_at: Option<i64>,
}

/// Order line
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub menu_item_id: i64,
    pub quantity: i64,
    /// Price captured at order time
    pub unit_price: f64,
    /// Caller-computed quantity × unit_price, stored as given
    pub subtotal: f64,
    pub notes: Option<String>,
    pub created_at: i64,
}

/// Order line joined with the menu item name
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItemDetail {
    pub id: i64,
    pub order_id: i64,
    pub menu_item_id: i64,
    pub menu_item_name: Option<String>,
    pub quantity: i64,
    pub unit_price: f64,
    pub subtotal: f64,
    pub notes: Option<String>,
    pub created_at: i64,
}

/// One cart line as submitted by a client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub menu_item_id: i64,
    pub quantity: i64,
    pub unit_price: f64,
    /// Computed by the caller; never recomputed server-side
    pub subtotal: f64,
    pub notes: Option<String>,
}

/// Staff order creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    #[serde(default)]
    pub order_type: OrderType,
    pub table_id: Option<i64>,
    pub items: Vec<CartLine>,
    pub notes: Option<String>,
    /// Defaults to the sum of line subtotals when omitted
    pub total_amount: Option<f64>,
}

/// Status editor payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

/// Customer self-order payload (QR menu)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerOrderCreate {
    /// Table number as typed / defaulted on the customer page
    pub table_number: String,
    pub items: Vec<CartLine>,
    pub notes: Option<String>,
}

/// Full order view: header, lines and payments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: OrderSummary,
    pub items: Vec<OrderItemDetail>,
    pub payments: Vec<Payment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_statuses() {
        assert!(OrderStatus::Pending.is_active());
        assert!(OrderStatus::Served.is_active());
        assert!(!OrderStatus::Completed.is_active());
        assert!(!OrderStatus::Cancelled.is_active());
    }

    #[test]
    fn test_order_create_defaults_to_dine_in() {
        let json = r#"{"table_id": 5, "items": [], "notes": null, "total_amount": null}"#;
        let create: OrderCreate = serde_json::from_str(json).unwrap();
        assert_eq!(create.order_type, OrderType::DineIn);
        assert_eq!(create.table_id, Some(5));
    }

    #[test]
    fn test_order_type_wire_format() {
        assert_eq!(
            serde_json::to_string(&OrderType::DineIn).unwrap(),
            "\"dine_in\""
        );
        assert_eq!("cancelled".parse::<OrderStatus>(), Ok(OrderStatus::Cancelled));
    }
}
