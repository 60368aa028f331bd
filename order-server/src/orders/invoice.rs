//! Printable invoice view of an order

use chrono_tz::Tz;
use serde::Serialize;
use shared::models::{OrderDetail, OrderStatus};

use crate::utils::codes::{invoice_number, order_barcode};
use crate::utils::money::round_money;
use crate::utils::time::format_datetime;

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceLine {
    pub name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub subtotal: f64,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Invoice {
    pub order_id: i64,
    /// `#` + 8 hex digits
    pub invoice_number: String,
    /// `ORD-` + 8 hex digits
    pub barcode: String,
    /// Creation time in the business time zone
    pub date: String,
    /// Table number, or "Delivery"
    pub table: String,
    pub hall: Option<String>,
    pub status: OrderStatus,
    /// Cash / Card / Other; None while unpaid
    pub payment_method: Option<&'static str>,
    pub lines: Vec<InvoiceLine>,
    pub notes: Option<String>,
    pub total: f64,
}

pub fn build_invoice(detail: &OrderDetail, tz: Tz) -> Invoice {
    let order = &detail.order;
    let table = match (&order.table_number, order.table_id) {
        (Some(number), _) => number.clone(),
        (None, Some(id)) => format!("#{id}"),
        (None, None) => "Delivery".to_string(),
    };

    let lines = detail
        .items
        .iter()
        .map(|item| InvoiceLine {
            name: item
                .menu_item_name
                .clone()
                .unwrap_or_else(|| "Unspecified".to_string()),
            quantity: item.quantity,
            unit_price: round_money(item.unit_price),
            subtotal: round_money(item.subtotal),
            notes: item.notes.clone(),
        })
        .collect();

    Invoice {
        order_id: order.id,
        invoice_number: invoice_number(order.id),
        barcode: order_barcode(order.id),
        date: format_datetime(order.created_at, tz),
        table,
        hall: order.hall_name.clone(),
        status: order.status,
        payment_method: detail.payments.first().map(|p| p.payment_method.label()),
        lines,
        notes: order.notes.clone(),
        total: round_money(order.total_amount),
    }
}
