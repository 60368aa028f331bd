//! Input validation helpers
//!
//! Checks that run before any write. Nothing here re-derives subtotals or
//! compares quantities against stock.

use shared::error::ErrorCode;
use shared::models::{CartLine, OrderType};

use crate::utils::AppError;

/// Hall, table and menu item names
pub const MAX_NAME_LEN: usize = 200;

/// Table numbers as printed on the table
pub const MAX_TABLE_NUMBER_LEN: usize = 32;

/// Notes, descriptions
pub const MAX_NOTE_LEN: usize = 500;

/// Barcodes, categories, payment references
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Image URLs
pub const MAX_URL_LEN: usize = 2048;

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            format!("{field} must not be empty"),
        )
        .with_detail("field", field));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Price and cost must be finite and non-negative
pub fn validate_amount(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::with_message(
            ErrorCode::MenuItemInvalidPrice,
            format!("{field} must be a non-negative number, got {value}"),
        )
        .with_detail("field", field));
    }
    Ok(())
}

pub fn validate_capacity(capacity: i32) -> Result<(), AppError> {
    if capacity <= 0 {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("capacity must be positive, got {capacity}"),
        ));
    }
    Ok(())
}

/// Cart checks shared by staff orders, quick checkout and self-order
///
/// Empty cart and dine-in without table are rejected. Lines need a positive
/// quantity and finite numbers; the subtotal itself is accepted as sent.
pub fn validate_cart(
    order_type: OrderType,
    table_id: Option<i64>,
    items: &[CartLine],
) -> Result<(), AppError> {
    if items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }
    if order_type == OrderType::DineIn && table_id.is_none() {
        return Err(AppError::new(ErrorCode::TableRequired));
    }
    validate_lines(items)
}

pub fn validate_lines(items: &[CartLine]) -> Result<(), AppError> {
    for line in items {
        if line.quantity <= 0 {
            return Err(AppError::validation(format!(
                "quantity must be positive, got {}",
                line.quantity
            ))
            .with_detail("menu_item_id", line.menu_item_id));
        }
        if !line.unit_price.is_finite() || !line.subtotal.is_finite() {
            return Err(AppError::validation("price must be a finite number")
                .with_detail("menu_item_id", line.menu_item_id));
        }
        validate_optional_text(&line.notes, "notes", MAX_NOTE_LEN)?;
    }
    Ok(())
}
