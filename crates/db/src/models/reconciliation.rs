//! Result types for the invitation-reconciliation procedure.

use serde::Serialize;
use timewheel_core::types::DbId;

use crate::models::invitation::InvitationSummary;

/// Outcome of one reconciliation run for a user.
#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReconciliationOutcome {
    /// An invitation was consumed: membership ensured, role promoted.
    Applied {
        invitation: InvitationSummary,
        organization_id: DbId,
        /// `false` when the membership row already existed and the
        /// upsert was a no-op.
        membership_created: bool,
    },
    /// No pending, unexpired invitation matched the user's email.
    NoInvitation,
    /// A concurrent run consumed the matched invitation first; nothing
    /// was changed by this run.
    AlreadyConsumed,
}
