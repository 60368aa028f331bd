//! Order Server - restaurant point of sale backend
//!
//! Halls and tables, the menu catalog, the order lifecycle, payment
//! capture, reporting and the customer QR self-order menu, served over HTTP
//! from an embedded SQLite database.
//!
//! # Module layout
//!
//! ```text
//! order-server/src/
//! ├── core/        # config, state, HTTP server
//! ├── auth/        # JWT validation, permissions
//! ├── db/          # pool, migrations, repositories
//! ├── cache/       # read cache keyed by query
//! ├── orders/      # order lifecycle, invoices
//! ├── payments/    # payment capture, quick checkout
//! ├── reports/     # aggregation and exports
//! ├── customer/    # QR self-order
//! ├── api/         # HTTP handlers
//! ├── middleware/  # request logging
//! ├── routes/      # router assembly
//! └── utils/       # logging, money, time, validation
//! ```

pub mod api;
pub mod auth;
pub mod cache;
pub mod core;
pub mod customer;
pub mod db;
pub mod middleware;
pub mod orders;
pub mod payments;
pub mod reports;
pub mod routes;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use cache::{QueryCache, QueryKey};
pub use core::{Config, Server, ServerState};
pub use routes::{OneshotRouter, build_app, build_router};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

pub use utils::logger::{init_logger, init_logger_with_file};

/// Security event log line with `target: "security"`
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load `.env`, create the work directories and start logging
pub fn setup_environment(config: &Config) -> AppResult<()> {
    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir)
        .map_err(|e| AppError::internal(format!("Failed to create {log_dir}: {e}")))?;
    init_logger_with_file(
        Some(&config.log_level),
        Some(config.log_json),
        Some(&log_dir),
    );
    Ok(())
}
