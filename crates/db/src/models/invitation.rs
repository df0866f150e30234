//! Invitation model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use timewheel_core::types::{DbId, Timestamp};

/// Full invitation row.
///
/// `token` is single-use and unguessable; it is only ever serialized in
/// the admin creation response, never in list endpoints (see
/// [`InvitationSummary`]).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Invitation {
    pub id: DbId,
    pub kind: String,
    pub email: String,
    pub organization_id: DbId,
    pub invited_by: Option<DbId>,
    pub role: String,
    pub token: String,
    pub expires_at: Timestamp,
    pub accepted: bool,
    pub accepted_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// Token-free invitation representation for list endpoints.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InvitationSummary {
    pub id: DbId,
    pub kind: String,
    pub email: String,
    pub organization_id: DbId,
    pub role: String,
    pub expires_at: Timestamp,
    pub accepted: bool,
    pub accepted_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating an invitation. Token and expiry are generated
/// server-side.
#[derive(Debug, Deserialize)]
pub struct CreateInvitation {
    pub email: String,
    pub organization_id: DbId,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default = "default_kind")]
    pub kind: String,
}

fn default_role() -> String {
    timewheel_core::roles::ROLE_MEMBER.to_string()
}

fn default_kind() -> String {
    timewheel_core::invitation::KIND_TEAM.to_string()
}
