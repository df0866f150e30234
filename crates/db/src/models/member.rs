//! Organization membership model.

use serde::Serialize;
use sqlx::FromRow;
use timewheel_core::types::{DbId, Timestamp};

/// Full organization-membership row.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OrganizationMember {
    pub id: DbId,
    pub organization_id: DbId,
    pub user_id: DbId,
    pub role: String,
    pub invited_by: Option<DbId>,
    pub joined_at: Timestamp,
    pub is_active: bool,
}

/// Membership joined with the member's profile, for list endpoints.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MemberWithProfile {
    pub id: DbId,
    pub organization_id: DbId,
    pub user_id: DbId,
    pub role: String,
    pub joined_at: Timestamp,
    pub is_active: bool,
    pub email: String,
    pub full_name: Option<String>,
}
