//! Printed identifiers: invoice numbers, barcodes and table QR targets

use shared::util::short_ref;

/// `#` followed by eight hex digits of the order id
pub fn invoice_number(order_id: i64) -> String {
    format!("#{}", short_ref(order_id))
}

pub fn order_barcode(order_id: i64) -> String {
    format!("ORD-{}", short_ref(order_id))
}

/// Fallback barcode for a menu item created without one
pub fn default_item_barcode(now_millis: i64) -> String {
    format!("ITEM-{now_millis}")
}

/// Customer menu URL a table's QR code points to
pub fn table_qr_url(public_base_url: &str, table_id: i64) -> String {
    format!(
        "{}/customer-menu/{}",
        public_base_url.trim_end_matches('/'),
        table_id
    )
}
