//! Area / field / activity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use timewheel_core::types::{DbId, Timestamp};

/// Top-level taxonomy entry. Carries a display color.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Area {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub color: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// Mid-level taxonomy entry under an area.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Field {
    pub id: DbId,
    pub area_id: DbId,
    pub name: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// Leaf taxonomy entry under a field.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Activity {
    pub id: DbId,
    pub field_id: DbId,
    pub name: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// DTO for creating an area.
#[derive(Debug, Deserialize)]
pub struct CreateArea {
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    "#808080".to_string()
}

/// DTO for updating an area.
#[derive(Debug, Deserialize)]
pub struct UpdateArea {
    pub name: Option<String>,
    pub color: Option<String>,
    pub is_active: Option<bool>,
}

/// DTO for creating a field or activity (name only).
#[derive(Debug, Deserialize)]
pub struct CreateNamed {
    pub name: String,
}

/// DTO for updating a field or activity.
#[derive(Debug, Deserialize)]
pub struct UpdateNamed {
    pub name: Option<String>,
    pub is_active: Option<bool>,
}
