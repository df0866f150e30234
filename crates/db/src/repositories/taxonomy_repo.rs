//! Repositories for the `areas`, `fields`, and `activities` tables.
//!
//! The three levels share the same lifecycle (create, rename,
//! soft-deactivate) so they live in one module. Ownership checks walk the
//! chain up to the owning user.

use sqlx::PgPool;
use timewheel_core::types::DbId;

use crate::models::taxonomy::{Activity, Area, Field};

const AREA_COLUMNS: &str = "id, user_id, name, color, is_active, created_at";
const FIELD_COLUMNS: &str = "id, area_id, name, is_active, created_at";
const ACTIVITY_COLUMNS: &str = "id, field_id, name, is_active, created_at";

/// Provides data access for top-level areas.
pub struct AreaRepo;

impl AreaRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        name: &str,
        color: &str,
    ) -> Result<Area, sqlx::Error> {
        let query = format!(
            "INSERT INTO areas (user_id, name, color)
             VALUES ($1, $2, $3)
             RETURNING {AREA_COLUMNS}"
        );
        sqlx::query_as::<_, Area>(&query)
            .bind(user_id)
            .bind(name)
            .bind(color)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Area>, sqlx::Error> {
        let query = format!("SELECT {AREA_COLUMNS} FROM areas WHERE id = $1");
        sqlx::query_as::<_, Area>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's areas, optionally including deactivated ones.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        include_inactive: bool,
    ) -> Result<Vec<Area>, sqlx::Error> {
        let query = format!(
            "SELECT {AREA_COLUMNS} FROM areas
             WHERE user_id = $1 AND (is_active OR $2)
             ORDER BY name"
        );
        sqlx::query_as::<_, Area>(&query)
            .bind(user_id)
            .bind(include_inactive)
            .fetch_all(pool)
            .await
    }

    /// Update name/color/active flag. Only non-`None` fields apply.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        name: Option<&str>,
        color: Option<&str>,
        is_active: Option<bool>,
    ) -> Result<Option<Area>, sqlx::Error> {
        let query = format!(
            "UPDATE areas SET
                name = COALESCE($2, name),
                color = COALESCE($3, color),
                is_active = COALESCE($4, is_active)
             WHERE id = $1
             RETURNING {AREA_COLUMNS}"
        );
        sqlx::query_as::<_, Area>(&query)
            .bind(id)
            .bind(name)
            .bind(color)
            .bind(is_active)
            .fetch_optional(pool)
            .await
    }

    /// Soft-deactivate an area. Returns `true` if a row was updated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE areas SET is_active = false WHERE id = $1 AND is_active = true")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Provides data access for mid-level fields.
pub struct FieldRepo;

impl FieldRepo {
    pub async fn create(pool: &PgPool, area_id: DbId, name: &str) -> Result<Field, sqlx::Error> {
        let query = format!(
            "INSERT INTO fields (area_id, name)
             VALUES ($1, $2)
             RETURNING {FIELD_COLUMNS}"
        );
        sqlx::query_as::<_, Field>(&query)
            .bind(area_id)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Field>, sqlx::Error> {
        let query = format!("SELECT {FIELD_COLUMNS} FROM fields WHERE id = $1");
        sqlx::query_as::<_, Field>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_for_area(
        pool: &PgPool,
        area_id: DbId,
        include_inactive: bool,
    ) -> Result<Vec<Field>, sqlx::Error> {
        let query = format!(
            "SELECT {FIELD_COLUMNS} FROM fields
             WHERE area_id = $1 AND (is_active OR $2)
             ORDER BY name"
        );
        sqlx::query_as::<_, Field>(&query)
            .bind(area_id)
            .bind(include_inactive)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        name: Option<&str>,
        is_active: Option<bool>,
    ) -> Result<Option<Field>, sqlx::Error> {
        let query = format!(
            "UPDATE fields SET
                name = COALESCE($2, name),
                is_active = COALESCE($3, is_active)
             WHERE id = $1
             RETURNING {FIELD_COLUMNS}"
        );
        sqlx::query_as::<_, Field>(&query)
            .bind(id)
            .bind(name)
            .bind(is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE fields SET is_active = false WHERE id = $1 AND is_active = true")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Resolve the user owning a field (via its area).
    pub async fn owner_id(pool: &PgPool, id: DbId) -> Result<Option<DbId>, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as(
            "SELECT a.user_id FROM fields f JOIN areas a ON a.id = f.area_id WHERE f.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(user_id,)| user_id))
    }
}

/// Provides data access for leaf activities.
pub struct ActivityRepo;

impl ActivityRepo {
    pub async fn create(
        pool: &PgPool,
        field_id: DbId,
        name: &str,
    ) -> Result<Activity, sqlx::Error> {
        let query = format!(
            "INSERT INTO activities (field_id, name)
             VALUES ($1, $2)
             RETURNING {ACTIVITY_COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(field_id)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Activity>, sqlx::Error> {
        let query = format!("SELECT {ACTIVITY_COLUMNS} FROM activities WHERE id = $1");
        sqlx::query_as::<_, Activity>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_for_field(
        pool: &PgPool,
        field_id: DbId,
        include_inactive: bool,
    ) -> Result<Vec<Activity>, sqlx::Error> {
        let query = format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activities
             WHERE field_id = $1 AND (is_active OR $2)
             ORDER BY name"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(field_id)
            .bind(include_inactive)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        name: Option<&str>,
        is_active: Option<bool>,
    ) -> Result<Option<Activity>, sqlx::Error> {
        let query = format!(
            "UPDATE activities SET
                name = COALESCE($2, name),
                is_active = COALESCE($3, is_active)
             WHERE id = $1
             RETURNING {ACTIVITY_COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(id)
            .bind(name)
            .bind(is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE activities SET is_active = false WHERE id = $1 AND is_active = true",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Verify a (area, field, activity) triple chains parent -> child and
    /// belongs to `user_id`. Returns `true` when the chain is valid.
    pub async fn triple_belongs_to_user(
        pool: &PgPool,
        user_id: DbId,
        area_id: DbId,
        field_id: DbId,
        activity_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as(
            "SELECT ac.id \
             FROM activities ac \
             JOIN fields f ON f.id = ac.field_id \
             JOIN areas a ON a.id = f.area_id \
             WHERE ac.id = $1 AND f.id = $2 AND a.id = $3 AND a.user_id = $4 \
               AND ac.is_active AND f.is_active AND a.is_active",
        )
        .bind(activity_id)
        .bind(field_id)
        .bind(area_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
        Ok(row.is_some())
    }
}
