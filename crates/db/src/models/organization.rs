//! Organization model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use timewheel_core::types::{DbId, Timestamp};

/// Full organization row.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Organization {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub created_at: Timestamp,
}

/// DTO for creating an organization.
#[derive(Debug, Deserialize)]
pub struct CreateOrganization {
    pub name: String,
    pub slug: String,
}
