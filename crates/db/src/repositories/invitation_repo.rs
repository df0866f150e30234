//! Repository for the `invitations` table.
//!
//! The accept transition is deliberately NOT exposed here: flipping
//! `accepted` is the linchpin of the reconciliation procedure and only
//! happens inside its transaction (see [`super::reconciliation`]).

use sqlx::PgPool;
use timewheel_core::types::DbId;

use crate::models::invitation::{Invitation, InvitationSummary};

const COLUMNS: &str = "id, kind, email, organization_id, invited_by, role, token, \
                        expires_at, accepted, accepted_at, created_at";

const SUMMARY_COLUMNS: &str = "id, kind, email, organization_id, role, expires_at, \
                                accepted, accepted_at, created_at";

/// Provides data access for invitations.
pub struct InvitationRepo;

impl InvitationRepo {
    /// Insert a new invitation with a server-generated token and expiry.
    pub async fn create(
        pool: &PgPool,
        kind: &str,
        email: &str,
        organization_id: DbId,
        invited_by: Option<DbId>,
        role: &str,
        token: &str,
        expires_at: timewheel_core::types::Timestamp,
    ) -> Result<Invitation, sqlx::Error> {
        let query = format!(
            "INSERT INTO invitations (kind, email, organization_id, invited_by, role, token, expires_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invitation>(&query)
            .bind(kind)
            .bind(email)
            .bind(organization_id)
            .bind(invited_by)
            .bind(role)
            .bind(token)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find an invitation by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Invitation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM invitations WHERE id = $1");
        sqlx::query_as::<_, Invitation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List invitations for an organization, most recent first.
    pub async fn list_for_organization(
        pool: &PgPool,
        organization_id: DbId,
    ) -> Result<Vec<InvitationSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM invitations
             WHERE organization_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, InvitationSummary>(&query)
            .bind(organization_id)
            .fetch_all(pool)
            .await
    }

    /// List all invitations, most recent first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<InvitationSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM invitations ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, InvitationSummary>(&query)
            .fetch_all(pool)
            .await
    }

    /// Revoke a pending invitation by expiring it immediately.
    ///
    /// Accepted invitations are left untouched. Returns `true` if a row
    /// was updated.
    pub async fn revoke(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE invitations SET expires_at = NOW()
             WHERE id = $1 AND accepted = false AND expires_at > NOW()",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
