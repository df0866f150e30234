//! Admin invitation handlers: create, list, revoke.
//!
//! The invitation row is the source of truth; the email is a courtesy.
//! Sending happens on a spawned task and failures only log.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use timewheel_core::error::CoreError;
use timewheel_core::invitation;
use timewheel_core::types::DbId;
use timewheel_db::models::invitation::CreateInvitation;
use timewheel_db::repositories::{InvitationRepo, OrganizationRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the invitation list.
#[derive(Debug, Deserialize)]
pub struct InvitationListParams {
    pub organization_id: Option<DbId>,
}

/// POST /api/v1/admin/invitations
///
/// Create an invitation with a server-generated single-use token and a
/// default 7-day expiry. The response is the only place the token is ever
/// serialized.
pub async fn create_invitation(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateInvitation>,
) -> AppResult<impl IntoResponse> {
    invitation::validate_new(&input.email, &input.role, &input.kind)?;

    let organization = OrganizationRepo::find_by_id(&state.pool, input.organization_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Organization",
            id: input.organization_id,
        }))?;

    let email = invitation::normalize_email(&input.email);
    let token = invitation::generate_token();
    let expires_at = invitation::default_expiry(chrono::Utc::now());

    let created = InvitationRepo::create(
        &state.pool,
        &input.kind,
        &email,
        organization.id,
        Some(admin.user_id),
        &input.role,
        &token,
        expires_at,
    )
    .await?;

    tracing::info!(
        invitation_id = created.id,
        organization_id = organization.id,
        invited_by = admin.user_id,
        kind = %created.kind,
        role = %created.role,
        "Invitation created"
    );

    if let Some(mailer) = state.mailer.clone() {
        let to = created.email.clone();
        let org_name = organization.name.clone();
        let token = created.token.clone();
        let invitation_id = created.id;
        tokio::spawn(async move {
            if let Err(e) = mailer.send_invitation(&to, &org_name, &token, expires_at).await {
                tracing::warn!(invitation_id, error = %e, "Invitation email delivery failed");
            }
        });
    } else {
        tracing::debug!(
            invitation_id = created.id,
            "SMTP not configured, skipping invitation email"
        );
    }

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/admin/invitations?organization_id=
///
/// List invitations (token-free), optionally scoped to one organization.
pub async fn list_invitations(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<InvitationListParams>,
) -> AppResult<impl IntoResponse> {
    let invitations = match params.organization_id {
        Some(organization_id) => {
            InvitationRepo::list_for_organization(&state.pool, organization_id).await?
        }
        None => InvitationRepo::list_all(&state.pool).await?,
    };

    Ok(Json(DataResponse { data: invitations }))
}

/// DELETE /api/v1/admin/invitations/{id}
///
/// Revoke a pending invitation by expiring it immediately. An already
/// accepted or expired invitation cannot be revoked (409).
pub async fn revoke_invitation(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(invitation_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let revoked = InvitationRepo::revoke(&state.pool, invitation_id).await?;

    if !revoked {
        // Distinguish "no such invitation" from "not pending anymore".
        return match InvitationRepo::find_by_id(&state.pool, invitation_id).await? {
            None => Err(AppError::Core(CoreError::NotFound {
                entity: "Invitation",
                id: invitation_id,
            })),
            Some(_) => Err(AppError::Core(CoreError::Conflict(
                "Invitation is no longer pending".into(),
            ))),
        };
    }

    tracing::info!(invitation_id, revoked_by = admin.user_id, "Invitation revoked");

    Ok(StatusCode::NO_CONTENT)
}
