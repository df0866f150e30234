//! Admin organization handlers: create and list.
//!
//! Organizations are provisioned by admins; everything else about them is
//! reached through invitations and memberships.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use timewheel_core::organization;
use timewheel_db::models::organization::CreateOrganization;
use timewheel_db::repositories::OrganizationRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/organizations
///
/// Create an organization. A duplicate slug is a 409.
pub async fn create_organization(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateOrganization>,
) -> AppResult<impl IntoResponse> {
    organization::validate_name(&input.name)?;
    organization::validate_slug(&input.slug)?;

    let created = OrganizationRepo::create(&state.pool, &input).await?;

    tracing::info!(
        organization_id = created.id,
        slug = %created.slug,
        created_by = admin.user_id,
        "Organization created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/organizations
///
/// List all organizations, ordered by name. Admin only.
pub async fn list_organizations(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let organizations = OrganizationRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: organizations,
    }))
}
