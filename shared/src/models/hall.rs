//! Hall Model

use serde::{Deserialize, Serialize};

/// Hall entity (dining room, terrace, ...). Groups tables for display only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Hall {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
}

/// Create hall payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HallCreate {
    pub name: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// Update hall payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HallUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}
