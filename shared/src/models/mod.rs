//! Data models
//!
//! Shared between order-server and its clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` snowflakes, timestamps are Unix millis.

pub mod dining_table;
pub mod hall;
pub mod menu_item;
pub mod order;
pub mod payment;
pub mod report;

// Re-exports
pub use dining_table::*;
pub use hall::*;
pub use menu_item::*;
pub use order::*;
pub use payment::*;
pub use report::*;
