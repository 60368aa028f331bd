use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::cache::QueryCache;
use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppResult;

/// Shared server state
///
/// Cheap to clone: every service sits behind a pool handle or an `Arc`.
///
/// | Field | Meaning |
/// |-------|---------|
/// | config | Immutable configuration |
/// | db | SQLite pool |
/// | jwt_service | Token validation |
/// | cache | Read cache invalidated by write paths |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub jwt_service: Arc<JwtService>,
    pub cache: Arc<QueryCache>,
}

impl ServerState {
    pub fn new(config: Config, db: DbService, jwt_service: Arc<JwtService>) -> Self {
        let cache = Arc::new(QueryCache::new(config.cache_enabled));
        Self {
            config,
            db,
            jwt_service,
            cache,
        }
    }

    /// Open the database under the configured path and build the state
    ///
    /// Creates `WORK_DIR` and `WORK_DIR/logs` when missing.
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        std::fs::create_dir_all(config.log_dir()).map_err(|e| {
            crate::utils::AppError::internal(format!(
                "Failed to create work directory {}: {e}",
                config.work_dir
            ))
        })?;
        if let Some(parent) = std::path::Path::new(&config.database_path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                crate::utils::AppError::internal(format!(
                    "Failed to create database directory: {e}"
                ))
            })?;
        }

        let db = DbService::new(&config.database_path).await?;
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Ok(Self::new(config.clone(), db, jwt_service))
    }

    /// State over a private in-memory database (tests, demos)
    pub async fn in_memory(config: Config) -> AppResult<Self> {
        let db = DbService::in_memory().await?;
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Ok(Self::new(config, db, jwt_service))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        Arc::clone(&self.jwt_service)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::ServerState;
    use crate::core::Config;

    /// In-memory state with the cache on and UTC business time
    pub async fn test_state() -> ServerState {
        let mut config = Config::from_env();
        config.cache_enabled = true;
        config.timezone = chrono_tz::Tz::UTC;
        config.public_base_url = "http://pos.test".to_string();
        ServerState::in_memory(config).await.unwrap()
    }
}
