//! Time entry model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use timewheel_core::types::{DbId, Timestamp};

/// Full time-entry row.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TimeEntry {
    pub id: DbId,
    pub user_id: DbId,
    pub area_id: DbId,
    pub field_id: DbId,
    pub activity_id: DbId,
    pub duration_hours: f64,
    pub entry_date: NaiveDate,
    pub description: Option<String>,
    pub started_at: Option<Timestamp>,
    pub ended_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for logging a new entry.
#[derive(Debug, Deserialize)]
pub struct CreateTimeEntry {
    pub area_id: DbId,
    pub field_id: DbId,
    pub activity_id: DbId,
    pub duration_hours: f64,
    pub entry_date: NaiveDate,
    pub description: Option<String>,
    pub started_at: Option<Timestamp>,
    pub ended_at: Option<Timestamp>,
}

/// DTO for the inline edit allowed inside the post-creation window.
#[derive(Debug, Deserialize)]
pub struct UpdateTimeEntry {
    pub duration_hours: Option<f64>,
    pub entry_date: Option<NaiveDate>,
    pub description: Option<String>,
}

/// One row of the per-area analytics breakdown.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AreaBreakdown {
    pub area_id: DbId,
    pub area_name: String,
    pub color: String,
    pub total_hours: f64,
    pub entry_count: i64,
}

/// Entry joined with its resolved taxonomy names, used for summary
/// prompt construction.
#[derive(Debug, Clone, FromRow)]
pub struct EntryWithNames {
    pub entry_date: NaiveDate,
    pub area: String,
    pub field: String,
    pub activity: String,
    pub duration_hours: f64,
    pub description: Option<String>,
}
