//! Cache API
//!
//! | Path | Method | Permission |
//! |------|--------|------------|
//! | /api/cache/invalidate | POST | settings:manage |

use axum::{Json, Router, extract::State, middleware, routing::post};
use serde::{Deserialize, Serialize};

use crate::auth::{CurrentUser, permissions, require_permission};
use crate::cache::QueryKey;
use crate::core::ServerState;
use crate::security_log;
use crate::utils::{AppError, AppResult};

pub fn router() -> Router<ServerState> {
    Router::new().nest(
        "/api/cache",
        Router::new()
            .route("/invalidate", post(invalidate))
            .layer(middleware::from_fn(require_permission(
                permissions::SETTINGS_MANAGE,
            ))),
    )
}

/// Body is optional; without `keys` every entry is dropped
#[derive(Debug, Default, Deserialize)]
pub struct InvalidateRequest {
    pub keys: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct InvalidateResponse {
    pub invalidated: Vec<&'static str>,
}

async fn invalidate(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    payload: Option<Json<InvalidateRequest>>,
) -> AppResult<Json<InvalidateResponse>> {
    let keys = match payload.and_then(|Json(p)| p.keys) {
        None => QueryKey::ALL.to_vec(),
        Some(names) => names
            .iter()
            .map(|name| {
                QueryKey::ALL
                    .into_iter()
                    .find(|k| k.as_str() == name)
                    .ok_or_else(|| {
                        AppError::validation(format!("Unknown cache key: {name}"))
                            .with_detail("key", name.as_str())
                    })
            })
            .collect::<AppResult<Vec<_>>>()?,
    };

    state.cache.invalidate(&keys);
    let invalidated: Vec<&'static str> = keys.iter().map(QueryKey::as_str).collect();
    security_log!(
        "INFO",
        "cache_invalidated",
        user_id = current_user.id.clone(),
        keys = invalidated.join(",")
    );
    Ok(Json(InvalidateResponse { invalidated }))
}
