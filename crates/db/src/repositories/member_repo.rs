//! Repository for the `organization_members` table.

use sqlx::PgPool;
use timewheel_core::types::DbId;

use crate::models::member::{MemberWithProfile, OrganizationMember};

const COLUMNS: &str = "id, organization_id, user_id, role, invited_by, joined_at, is_active";

/// Provides data access for organization memberships.
pub struct MemberRepo;

impl MemberRepo {
    /// Find the membership row for a (organization, user) pair.
    pub async fn find(
        pool: &PgPool,
        organization_id: DbId,
        user_id: DbId,
    ) -> Result<Option<OrganizationMember>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM organization_members
             WHERE organization_id = $1 AND user_id = $2"
        );
        sqlx::query_as::<_, OrganizationMember>(&query)
            .bind(organization_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List all memberships for a user, active first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<OrganizationMember>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM organization_members
             WHERE user_id = $1
             ORDER BY is_active DESC, joined_at"
        );
        sqlx::query_as::<_, OrganizationMember>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List an organization's members joined with their profiles.
    pub async fn list_for_organization(
        pool: &PgPool,
        organization_id: DbId,
        include_inactive: bool,
    ) -> Result<Vec<MemberWithProfile>, sqlx::Error> {
        sqlx::query_as::<_, MemberWithProfile>(
            "SELECT m.id, m.organization_id, m.user_id, m.role, m.joined_at, m.is_active, \
                    u.email, u.full_name \
             FROM organization_members m \
             JOIN users u ON u.id = m.user_id \
             WHERE m.organization_id = $1 AND (m.is_active OR $2) \
             ORDER BY m.joined_at",
        )
        .bind(organization_id)
        .bind(include_inactive)
        .fetch_all(pool)
        .await
    }

    /// Soft-deactivate a membership. Returns `true` if a row was updated.
    pub async fn deactivate(
        pool: &PgPool,
        organization_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE organization_members SET is_active = false
             WHERE organization_id = $1 AND user_id = $2 AND is_active = true",
        )
        .bind(organization_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
