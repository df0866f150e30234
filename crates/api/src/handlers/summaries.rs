//! AI summary handler.
//!
//! The backend is pure glue: it renders the caller's entries into a
//! prompt (`timewheel_core::summary`) and forwards it to the hosted LLM.
//! Provider failure surfaces as 502; nothing is retried or cached.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::Serialize;
use timewheel_core::summary::{self, SummaryEntry};
use timewheel_db::repositories::TimeEntryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::DateRangeParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Generated summary with the range it covers.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub entry_count: usize,
    pub summary: String,
}

/// POST /api/v1/summaries
///
/// Generate a natural-language summary of the caller's entries in range.
pub async fn generate_summary(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(range): Json<DateRangeParams>,
) -> AppResult<impl IntoResponse> {
    range.validate()?;

    let entries =
        TimeEntryRepo::list_range_with_names(&state.pool, auth.user_id, range.from, range.to)
            .await?;

    let prompt_entries: Vec<SummaryEntry> = entries
        .into_iter()
        .map(|e| SummaryEntry {
            entry_date: e.entry_date,
            area: e.area,
            field: e.field,
            activity: e.activity,
            duration_hours: e.duration_hours,
            description: e.description,
        })
        .collect();

    let prompt = summary::build_prompt(&prompt_entries, range.from, range.to);

    let text = state
        .llm
        .complete(summary::SYSTEM_PROMPT, &prompt)
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    tracing::info!(
        user_id = auth.user_id,
        entry_count = prompt_entries.len(),
        "Generated time summary"
    );

    Ok(Json(DataResponse {
        data: SummaryResponse {
            from: range.from,
            to: range.to,
            entry_count: prompt_entries.len(),
            summary: text,
        },
    }))
}
