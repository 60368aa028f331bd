//! HTTP API
//!
//! One module per resource, each exposing `router()`:
//!
//! - [`health`] - liveness probe (public)
//! - [`halls`] - hall management
//! - [`tables`] - dining tables, status and QR links
//! - [`menu_items`] - menu catalog
//! - [`orders`] - order lifecycle, invoices
//! - [`payments`] - payment capture, unpaid list, quick checkout
//! - [`reports`] - dashboard, summaries and exports
//! - [`cache`] - operator cache reset
//! - [`customer`] - QR self-order (public)

pub mod cache;
pub mod customer;
pub mod halls;
pub mod health;
pub mod menu_items;
pub mod orders;
pub mod payments;
pub mod reports;
pub mod tables;

pub use crate::utils::{AppError, AppResult};
