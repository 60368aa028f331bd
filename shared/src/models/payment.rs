//! Payment Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::order::{CartLine, OrderType};

/// Payment method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    QrCode,
    Barcode,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
            Self::QrCode => "qr_code",
            Self::Barcode => "barcode",
        }
    }

    /// Receipt label; scan-based methods print as "Other"
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Card => "Card",
            Self::QrCode | Self::Barcode => "Other",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(Self::Cash),
            "card" => Ok(Self::Card),
            "qr_code" => Ok(Self::QrCode),
            "barcode" => Ok(Self::Barcode),
            other => Err(format!("unknown payment method: {other}")),
        }
    }
}

/// Payment record. Nothing prevents several rows per order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Payment {
    pub id: i64,
    pub order_id: i64,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    pub cashier_id: Option<String>,
    pub transaction_reference: Option<String>,
    pub created_at: i64,
}

/// Capture payment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCreate {
    pub order_id: i64,
    pub payment_method: PaymentMethod,
    pub transaction_reference: Option<String>,
}

/// POS quick checkout: order, lines and payment in one request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickCheckout {
    #[serde(default)]
    pub order_type: OrderType,
    pub table_id: Option<i64>,
    pub items: Vec<CartLine>,
    pub payment_method: PaymentMethod,
    pub transaction_reference: Option<String>,
    pub notes: Option<String>,
}
