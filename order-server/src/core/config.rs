use chrono_tz::Tz;

use crate::auth::JwtConfig;
use crate::utils::time::parse_timezone;
use crate::utils::{AppError, AppResult, ErrorCode};

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | Holds `order.db` and `logs/` |
/// | DATABASE_PATH | {WORK_DIR}/order.db | SQLite file |
/// | HTTP_PORT | 3000 | Listen port |
/// | ENVIRONMENT | development | development / production |
/// | LOG_LEVEL | info | tracing level |
/// | LOG_JSON | false | JSON log lines |
/// | TIMEZONE | UTC | Business time zone for report periods |
/// | PUBLIC_BASE_URL | http://localhost:3000 | Prefix of table QR URLs |
/// | LOW_STOCK_THRESHOLD | 10 | Dashboard low-stock cut-off (inclusive) |
/// | CACHE_ENABLED | true | Read cache on/off |
/// | JWT_SECRET, JWT_ISSUER, JWT_AUDIENCE, JWT_EXPIRATION_MINUTES | see [`JwtConfig`] | Token validation |
///
/// ```ignore
/// WORK_DIR=/srv/pos HTTP_PORT=8080 TIMEZONE=Europe/Madrid cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub database_path: String,
    pub http_port: u16,
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    /// Business time zone; report periods start at local midnight
    pub timezone: Tz,
    pub public_base_url: String,
    pub low_stock_threshold: i64,
    pub cache_enabled: bool,
    pub jwt: JwtConfig,
}

impl Config {
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let database_path = std::env::var("DATABASE_PATH")
            .unwrap_or_else(|_| format!("{}/order.db", work_dir.trim_end_matches('/')));

        Self {
            database_path,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            timezone: parse_timezone(
                &std::env::var("TIMEZONE").unwrap_or_else(|_| "UTC".into()),
            ),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            low_stock_threshold: std::env::var("LOW_STOCK_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            cache_enabled: std::env::var("CACHE_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            jwt: JwtConfig::from_env(),
            work_dir,
        }
    }

    /// Reject settings that are only tolerable in development
    pub fn validate(&self) -> AppResult<()> {
        if self.is_production() && std::env::var("JWT_SECRET").is_err() {
            return Err(AppError::with_message(
                ErrorCode::ConfigError,
                "JWT_SECRET must be set in production",
            ));
        }
        if self.http_port == 0 {
            return Err(AppError::with_message(
                ErrorCode::ConfigError,
                "HTTP_PORT must not be 0",
            ));
        }
        Ok(())
    }

    pub fn log_dir(&self) -> String {
        format!("{}/logs", self.work_dir.trim_end_matches('/'))
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
