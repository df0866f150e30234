//! Repository for the `time_entries` table.

use chrono::NaiveDate;
use sqlx::PgPool;
use timewheel_core::types::DbId;

use crate::models::time_entry::{
    AreaBreakdown, CreateTimeEntry, EntryWithNames, TimeEntry, UpdateTimeEntry,
};

const COLUMNS: &str = "id, user_id, area_id, field_id, activity_id, duration_hours, \
                        entry_date, description, started_at, ended_at, created_at, updated_at";

/// Provides data access for time entries.
pub struct TimeEntryRepo;

impl TimeEntryRepo {
    /// Insert a new entry, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateTimeEntry,
    ) -> Result<TimeEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO time_entries
                (user_id, area_id, field_id, activity_id, duration_hours,
                 entry_date, description, started_at, ended_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimeEntry>(&query)
            .bind(user_id)
            .bind(input.area_id)
            .bind(input.field_id)
            .bind(input.activity_id)
            .bind(input.duration_hours)
            .bind(input.entry_date)
            .bind(&input.description)
            .bind(input.started_at)
            .bind(input.ended_at)
            .fetch_one(pool)
            .await
    }

    /// Find an entry by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TimeEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM time_entries WHERE id = $1");
        sqlx::query_as::<_, TimeEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's entries within an inclusive date range.
    pub async fn list_range(
        pool: &PgPool,
        user_id: DbId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<TimeEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM time_entries
             WHERE user_id = $1 AND entry_date BETWEEN $2 AND $3
             ORDER BY entry_date, created_at"
        );
        sqlx::query_as::<_, TimeEntry>(&query)
            .bind(user_id)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }

    /// Apply an inline edit. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists. Edit-window
    /// enforcement happens in the handler, not here.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTimeEntry,
    ) -> Result<Option<TimeEntry>, sqlx::Error> {
        let query = format!(
            "UPDATE time_entries SET
                duration_hours = COALESCE($2, duration_hours),
                entry_date = COALESCE($3, entry_date),
                description = COALESCE($4, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimeEntry>(&query)
            .bind(id)
            .bind(input.duration_hours)
            .bind(input.entry_date)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Per-area totals for a user's entries within an inclusive range.
    pub async fn area_breakdown(
        pool: &PgPool,
        user_id: DbId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AreaBreakdown>, sqlx::Error> {
        sqlx::query_as::<_, AreaBreakdown>(
            "SELECT a.id AS area_id, a.name AS area_name, a.color, \
                    SUM(t.duration_hours) AS total_hours, \
                    COUNT(*) AS entry_count \
             FROM time_entries t \
             JOIN areas a ON a.id = t.area_id \
             WHERE t.user_id = $1 AND t.entry_date BETWEEN $2 AND $3 \
             GROUP BY a.id, a.name, a.color \
             ORDER BY total_hours DESC",
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await
    }

    /// A user's entries in range joined with their taxonomy names, in log
    /// order, for summary prompt construction.
    pub async fn list_range_with_names(
        pool: &PgPool,
        user_id: DbId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<EntryWithNames>, sqlx::Error> {
        sqlx::query_as::<_, EntryWithNames>(
            "SELECT t.entry_date, a.name AS area, f.name AS field, \
                    ac.name AS activity, t.duration_hours, t.description \
             FROM time_entries t \
             JOIN areas a ON a.id = t.area_id \
             JOIN fields f ON f.id = t.field_id \
             JOIN activities ac ON ac.id = t.activity_id \
             WHERE t.user_id = $1 AND t.entry_date BETWEEN $2 AND $3 \
             ORDER BY t.entry_date, t.created_at",
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await
    }
}
