//! User profile model and DTOs.
//!
//! Profiles mirror the hosted identity provider; `external_auth_id` is the
//! provider-side subject and `email` the verified address used for
//! invitation matching.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use timewheel_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: DbId,
    pub external_auth_id: Option<String>,
    pub email: String,
    pub full_name: Option<String>,
    pub role: String,
    pub onboarded: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for mirroring a profile from an identity-provider event or a
/// first sign-in.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertUser {
    pub external_auth_id: String,
    pub email: String,
    pub full_name: Option<String>,
}

/// DTO for updating an existing profile. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub onboarded: Option<bool>,
    pub is_active: Option<bool>,
}
