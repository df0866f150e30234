//! Time-entry handlers: logging, range listing, and the windowed edit.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use timewheel_core::error::CoreError;
use timewheel_core::time_entry;
use timewheel_core::types::DbId;
use timewheel_db::models::time_entry::{CreateTimeEntry, UpdateTimeEntry};
use timewheel_db::repositories::{ActivityRepo, TimeEntryRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::DateRangeParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/time-entries
///
/// Log a new entry. The referenced (area, field, activity) triple must
/// chain parent to child, belong to the caller, and be fully active.
pub async fn create_entry(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTimeEntry>,
) -> AppResult<impl IntoResponse> {
    time_entry::validate_duration(input.duration_hours)?;

    let valid_triple = ActivityRepo::triple_belongs_to_user(
        &state.pool,
        auth.user_id,
        input.area_id,
        input.field_id,
        input.activity_id,
    )
    .await?;
    if !valid_triple {
        return Err(AppError::Core(CoreError::Validation(
            "Activity does not belong to the given field and area, or the chain is inactive"
                .into(),
        )));
    }

    let entry = TimeEntryRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::debug!(
        entry_id = entry.id,
        user_id = auth.user_id,
        hours = entry.duration_hours,
        "Time entry logged"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// GET /api/v1/time-entries?from=&to=
///
/// List the caller's entries within an inclusive date range.
pub async fn list_entries(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(range): Query<DateRangeParams>,
) -> AppResult<impl IntoResponse> {
    range.validate()?;

    let entries = TimeEntryRepo::list_range(&state.pool, auth.user_id, range.from, range.to).await?;

    Ok(Json(DataResponse { data: entries }))
}

/// PUT /api/v1/time-entries/{id}
///
/// Inline edit, only allowed inside the post-creation window (24 hours).
/// Outside the window the entry is immutable and the edit gets 409. There
/// is no delete; corrections happen with fresh entries.
pub async fn update_entry(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(entry_id): Path<DbId>,
    Json(input): Json<UpdateTimeEntry>,
) -> AppResult<impl IntoResponse> {
    let existing = TimeEntryRepo::find_by_id(&state.pool, entry_id)
        .await?
        .filter(|e| e.user_id == auth.user_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Time entry",
            id: entry_id,
        }))?;

    if !time_entry::within_edit_window(existing.created_at, chrono::Utc::now()) {
        return Err(AppError::Core(CoreError::Conflict(
            "Time entry is outside its edit window".into(),
        )));
    }

    if let Some(hours) = input.duration_hours {
        time_entry::validate_duration(hours)?;
    }

    let entry = TimeEntryRepo::update(&state.pool, entry_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Time entry",
            id: entry_id,
        }))?;

    Ok(Json(DataResponse { data: entry }))
}
