//! Well-known role name constants.
//!
//! These must match the CHECK constraints in the `users`, `invitations`,
//! and `organization_members` migrations.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_OWNER: &str = "owner";
pub const ROLE_MEMBER: &str = "member";

/// Roles an invitation may grant. `owner` is only ever assigned at
/// organization creation, never through an invitation.
pub const INVITABLE_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_MEMBER];

/// Returns `true` if `role` is a role an invitation may grant.
pub fn is_invitable_role(role: &str) -> bool {
    INVITABLE_ROLES.contains(&role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_is_invitable() {
        assert!(is_invitable_role(ROLE_MEMBER));
    }

    #[test]
    fn owner_is_not_invitable() {
        assert!(!is_invitable_role(ROLE_OWNER));
    }
}
