//! Taxonomy handlers: areas, fields, and activities.
//!
//! All three levels are per-user and soft-deactivated. Ownership checks
//! walk the chain up to the owning user; a resource owned by someone else
//! is reported as not found rather than forbidden.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use timewheel_core::error::CoreError;
use timewheel_core::taxonomy;
use timewheel_core::types::DbId;
use timewheel_db::models::taxonomy::{Area, CreateArea, CreateNamed, UpdateArea, UpdateNamed};
use timewheel_db::repositories::{ActivityRepo, AreaRepo, FieldRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Areas
// ---------------------------------------------------------------------------

/// POST /api/v1/areas
pub async fn create_area(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateArea>,
) -> AppResult<impl IntoResponse> {
    taxonomy::validate_name(&input.name)?;
    taxonomy::validate_color(&input.color)?;

    let area = AreaRepo::create(&state.pool, auth.user_id, &input.name, &input.color).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: area })))
}

/// GET /api/v1/areas?include_inactive=
pub async fn list_areas(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<impl IntoResponse> {
    let areas = AreaRepo::list_for_user(&state.pool, auth.user_id, params.include_inactive).await?;

    Ok(Json(DataResponse { data: areas }))
}

/// PUT /api/v1/areas/{id}
pub async fn update_area(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(area_id): Path<DbId>,
    Json(input): Json<UpdateArea>,
) -> AppResult<impl IntoResponse> {
    owned_area(&state, auth.user_id, area_id).await?;

    if let Some(name) = input.name.as_deref() {
        taxonomy::validate_name(name)?;
    }
    if let Some(color) = input.color.as_deref() {
        taxonomy::validate_color(color)?;
    }

    let area = AreaRepo::update(
        &state.pool,
        area_id,
        input.name.as_deref(),
        input.color.as_deref(),
        input.is_active,
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Area",
        id: area_id,
    }))?;

    Ok(Json(DataResponse { data: area }))
}

/// DELETE /api/v1/areas/{id} -- soft-deactivate.
pub async fn deactivate_area(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(area_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    owned_area(&state, auth.user_id, area_id).await?;

    AreaRepo::deactivate(&state.pool, area_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// POST /api/v1/areas/{id}/fields
pub async fn create_field(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(area_id): Path<DbId>,
    Json(input): Json<CreateNamed>,
) -> AppResult<impl IntoResponse> {
    owned_area(&state, auth.user_id, area_id).await?;
    taxonomy::validate_name(&input.name)?;

    let field = FieldRepo::create(&state.pool, area_id, &input.name).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: field })))
}

/// GET /api/v1/areas/{id}/fields?include_inactive=
pub async fn list_fields(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(area_id): Path<DbId>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<impl IntoResponse> {
    owned_area(&state, auth.user_id, area_id).await?;

    let fields = FieldRepo::list_for_area(&state.pool, area_id, params.include_inactive).await?;

    Ok(Json(DataResponse { data: fields }))
}

/// PUT /api/v1/fields/{id}
pub async fn update_field(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(field_id): Path<DbId>,
    Json(input): Json<UpdateNamed>,
) -> AppResult<impl IntoResponse> {
    owned_field(&state, auth.user_id, field_id).await?;

    if let Some(name) = input.name.as_deref() {
        taxonomy::validate_name(name)?;
    }

    let field = FieldRepo::update(&state.pool, field_id, input.name.as_deref(), input.is_active)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Field",
            id: field_id,
        }))?;

    Ok(Json(DataResponse { data: field }))
}

/// DELETE /api/v1/fields/{id} -- soft-deactivate.
pub async fn deactivate_field(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(field_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    owned_field(&state, auth.user_id, field_id).await?;

    FieldRepo::deactivate(&state.pool, field_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Activities
// ---------------------------------------------------------------------------

/// POST /api/v1/fields/{id}/activities
pub async fn create_activity(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(field_id): Path<DbId>,
    Json(input): Json<CreateNamed>,
) -> AppResult<impl IntoResponse> {
    owned_field(&state, auth.user_id, field_id).await?;
    taxonomy::validate_name(&input.name)?;

    let activity = ActivityRepo::create(&state.pool, field_id, &input.name).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: activity })))
}

/// GET /api/v1/fields/{id}/activities?include_inactive=
pub async fn list_activities(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(field_id): Path<DbId>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<impl IntoResponse> {
    owned_field(&state, auth.user_id, field_id).await?;

    let activities =
        ActivityRepo::list_for_field(&state.pool, field_id, params.include_inactive).await?;

    Ok(Json(DataResponse { data: activities }))
}

/// PUT /api/v1/activities/{id}
pub async fn update_activity(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(activity_id): Path<DbId>,
    Json(input): Json<UpdateNamed>,
) -> AppResult<impl IntoResponse> {
    owned_activity(&state, auth.user_id, activity_id).await?;

    if let Some(name) = input.name.as_deref() {
        taxonomy::validate_name(name)?;
    }

    let activity = ActivityRepo::update(
        &state.pool,
        activity_id,
        input.name.as_deref(),
        input.is_active,
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Activity",
        id: activity_id,
    }))?;

    Ok(Json(DataResponse { data: activity }))
}

/// DELETE /api/v1/activities/{id} -- soft-deactivate.
pub async fn deactivate_activity(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(activity_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    owned_activity(&state, auth.user_id, activity_id).await?;

    ActivityRepo::deactivate(&state.pool, activity_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Ownership checks
// ---------------------------------------------------------------------------

async fn owned_area(state: &AppState, user_id: DbId, area_id: DbId) -> AppResult<Area> {
    AreaRepo::find_by_id(&state.pool, area_id)
        .await?
        .filter(|a| a.user_id == user_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Area",
            id: area_id,
        }))
}

async fn owned_field(state: &AppState, user_id: DbId, field_id: DbId) -> AppResult<()> {
    let owner = FieldRepo::owner_id(&state.pool, field_id).await?;
    if owner != Some(user_id) {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Field",
            id: field_id,
        }));
    }
    Ok(())
}

async fn owned_activity(state: &AppState, user_id: DbId, activity_id: DbId) -> AppResult<()> {
    let activity = ActivityRepo::find_by_id(&state.pool, activity_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Activity",
            id: activity_id,
        }))?;

    let owner = FieldRepo::owner_id(&state.pool, activity.field_id).await?;
    if owner != Some(user_id) {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Activity",
            id: activity_id,
        }));
    }
    Ok(())
}
