//! Analytics handler: per-area totals over a date range.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::Serialize;
use timewheel_db::models::time_entry::AreaBreakdown;
use timewheel_db::repositories::TimeEntryRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::DateRangeParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Aggregated analytics over the requested range.
#[derive(Debug, Serialize)]
pub struct AnalyticsSummary {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub total_hours: f64,
    pub entry_count: i64,
    pub areas: Vec<AreaBreakdown>,
}

/// GET /api/v1/analytics/summary?from=&to=
///
/// Totals come from SQL aggregates, not from re-summing rows in Rust.
pub async fn summary(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(range): Query<DateRangeParams>,
) -> AppResult<impl IntoResponse> {
    range.validate()?;

    let areas =
        TimeEntryRepo::area_breakdown(&state.pool, auth.user_id, range.from, range.to).await?;

    let total_hours = areas.iter().map(|a| a.total_hours).sum();
    let entry_count = areas.iter().map(|a| a.entry_count).sum();

    Ok(Json(DataResponse {
        data: AnalyticsSummary {
            from: range.from,
            to: range.to,
            total_hours,
            entry_count,
            areas,
        },
    }))
}
