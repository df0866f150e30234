//! Invitation rules: token generation, expiry, and email normalization.
//!
//! This module lives in `core` (zero internal deps) so it can be used by
//! both the repository layer and the API handlers.

use rand::Rng;

use crate::error::CoreError;
use crate::roles::is_invitable_role;
use crate::types::Timestamp;

/// Length of the generated invitation token (alphanumeric characters).
pub const TOKEN_LENGTH: usize = 48;

/// Default invitation lifetime in days.
pub const DEFAULT_EXPIRY_DAYS: i64 = 7;

/// Invitation kinds, matching the `invitations.kind` CHECK constraint.
pub const KIND_TEAM: &str = "team";
pub const KIND_ADMIN: &str = "admin";

/// Generate a random single-use invitation token.
pub fn generate_token() -> String {
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Compute the default expiry timestamp for an invitation created now.
pub fn default_expiry(now: Timestamp) -> Timestamp {
    now + chrono::Duration::days(DEFAULT_EXPIRY_DAYS)
}

/// Normalize an email address for matching: trimmed and lowercased.
///
/// Invitation matching is case-insensitive on email; both the stored and
/// incoming addresses pass through this before comparison.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// Validate the fields of a new invitation.
pub fn validate_new(email: &str, role: &str, kind: &str) -> Result<(), CoreError> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(CoreError::Validation(format!(
            "Invalid invitation email: '{email}'"
        )));
    }
    if !is_invitable_role(role) {
        return Err(CoreError::Validation(format!(
            "Role '{role}' cannot be granted by invitation"
        )));
    }
    if kind != KIND_TEAM && kind != KIND_ADMIN {
        return Err(CoreError::Validation(format!(
            "Unknown invitation kind: '{kind}'"
        )));
    }
    Ok(())
}
