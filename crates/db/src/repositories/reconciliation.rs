//! Invitation reconciliation: the single idempotent procedure run on every
//! authentication trigger (OAuth callback and dashboard bootstrap).
//!
//! All writes happen inside one transaction so an invitation is applied
//! all-or-nothing. The conditional accept (`... WHERE accepted = false`)
//! is the linchpin: when two triggers race on the same invitation, exactly
//! one sees a row flip and proceeds; the other observes zero rows and
//! stops without side effects. No explicit locking is needed.

use sqlx::PgPool;
use timewheel_core::types::DbId;

use crate::models::invitation::InvitationSummary;
use crate::models::reconciliation::ReconciliationOutcome;

const SUMMARY_COLUMNS: &str = "id, kind, email, organization_id, role, expires_at, \
                                accepted, accepted_at, created_at";

/// Runs the invitation-reconciliation procedure.
pub struct Reconciler;

impl Reconciler {
    /// Match, consume, and apply at most one pending invitation for the
    /// given user.
    ///
    /// Sequence (one transaction):
    /// 1. Match the most recent pending, unexpired invitation for
    ///    `email` (case-insensitive). None -> `NoInvitation`.
    /// 2. Conditionally flip `accepted`. Zero rows -> `AlreadyConsumed`.
    /// 3. Ensure a membership row exists for (organization, user);
    ///    an existing row, including its role, is left unchanged.
    /// 4. Promote the user's role to the invitation role and set
    ///    `onboarded = true`.
    pub async fn reconcile_invitation(
        pool: &PgPool,
        user_id: DbId,
        email: &str,
    ) -> Result<ReconciliationOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Step 1: most recent pending, unexpired invitation wins.
        let match_query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM invitations
             WHERE LOWER(email) = LOWER($1)
               AND accepted = false
               AND expires_at > NOW()
             ORDER BY created_at DESC
             LIMIT 1"
        );
        let Some(candidate) = sqlx::query_as::<_, InvitationSummary>(&match_query)
            .bind(email)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(ReconciliationOutcome::NoInvitation);
        };

        // Step 2: conditional accept. A concurrent run that got here first
        // leaves zero rows for us.
        let accept_query = format!(
            "UPDATE invitations SET accepted = true, accepted_at = NOW()
             WHERE id = $1 AND accepted = false
             RETURNING {SUMMARY_COLUMNS}"
        );
        let Some(invitation) = sqlx::query_as::<_, InvitationSummary>(&accept_query)
            .bind(candidate.id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            tx.rollback().await?;
            tracing::debug!(
                invitation_id = candidate.id,
                user_id,
                "Invitation already consumed by a concurrent trigger"
            );
            return Ok(ReconciliationOutcome::AlreadyConsumed);
        };

        // Step 3: membership upsert; existing rows (and their role) win.
        let inserted = sqlx::query(
            "INSERT INTO organization_members
                (organization_id, user_id, role, invited_by)
             SELECT organization_id, $2, role, invited_by
             FROM invitations WHERE id = $1
             ON CONFLICT (organization_id, user_id) DO NOTHING",
        )
        .bind(invitation.id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
        let membership_created = inserted.rows_affected() > 0;

        // Step 4: promote role, mark onboarded.
        sqlx::query("UPDATE users SET role = $2, onboarded = true WHERE id = $1")
            .bind(user_id)
            .bind(&invitation.role)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            invitation_id = invitation.id,
            organization_id = invitation.organization_id,
            user_id,
            membership_created,
            role = %invitation.role,
            "Invitation reconciled"
        );

        let organization_id = invitation.organization_id;
        Ok(ReconciliationOutcome::Applied {
            invitation,
            organization_id,
            membership_created,
        })
    }
}
