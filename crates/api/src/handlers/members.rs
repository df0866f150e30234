//! Organization membership handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use timewheel_core::error::CoreError;
use timewheel_core::roles::{ROLE_ADMIN, ROLE_OWNER};
use timewheel_core::types::DbId;
use timewheel_db::repositories::MemberRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/organizations/{id}/members
///
/// List an organization's members with their profiles. Visible to the
/// organization's own members and to admins.
pub async fn list_members(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(organization_id): Path<DbId>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<impl IntoResponse> {
    let is_admin = auth.role == ROLE_ADMIN || auth.role == ROLE_OWNER;
    if !is_admin {
        let membership = MemberRepo::find(&state.pool, organization_id, auth.user_id).await?;
        if !membership.is_some_and(|m| m.is_active) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Not a member of this organization".into(),
            )));
        }
    }

    let members =
        MemberRepo::list_for_organization(&state.pool, organization_id, params.include_inactive)
            .await?;

    Ok(Json(DataResponse { data: members }))
}

/// DELETE /api/v1/organizations/{id}/members/{user_id}
///
/// Soft-deactivate a membership. Admin only; the row stays for history.
pub async fn deactivate_member(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path((organization_id, user_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let deactivated = MemberRepo::deactivate(&state.pool, organization_id, user_id).await?;

    if !deactivated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Membership",
            id: user_id,
        }));
    }

    tracing::info!(
        organization_id,
        user_id,
        deactivated_by = admin.user_id,
        "Membership deactivated"
    );

    Ok(StatusCode::NO_CONTENT)
}
