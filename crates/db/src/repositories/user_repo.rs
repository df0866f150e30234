//! Repository for the `users` table.

use sqlx::PgPool;
use timewheel_core::types::DbId;

use crate::models::user::{UpdateUser, UpsertUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, external_auth_id, email, full_name, role, onboarded, \
                        is_active, created_at, updated_at";

/// Provides CRUD operations for user profiles.
pub struct UserRepo;

impl UserRepo {
    /// Mirror a profile from the identity provider, keyed by the
    /// provider-side subject. Creates the row on first contact and
    /// refreshes email/full_name afterwards.
    pub async fn upsert_from_identity(
        pool: &PgPool,
        input: &UpsertUser,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (external_auth_id, email, full_name)
             VALUES ($1, $2, $3)
             ON CONFLICT (external_auth_id) DO UPDATE SET
                email = EXCLUDED.email,
                full_name = COALESCE(EXCLUDED.full_name, users.full_name)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.external_auth_id)
            .bind(&input.email)
            .bind(&input.full_name)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by the identity provider's subject.
    pub async fn find_by_external_id(
        pool: &PgPool,
        external_auth_id: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE external_auth_id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(external_auth_id)
            .fetch_optional(pool)
            .await
    }

    /// Update a profile. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                email = COALESCE($2, email),
                full_name = COALESCE($3, full_name),
                role = COALESCE($4, role),
                onboarded = COALESCE($5, onboarded),
                is_active = COALESCE($6, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.email)
            .bind(&input.full_name)
            .bind(&input.role)
            .bind(input.onboarded)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Mark the authenticated user as onboarded (self-serve path, no
    /// invitation involved).
    pub async fn mark_onboarded(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET onboarded = true WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Soft-deactivate a profile by the identity provider's subject.
    ///
    /// Used by the `user.deleted` webhook event. Returns `true` if a row
    /// was updated.
    pub async fn deactivate_by_external_id(
        pool: &PgPool,
        external_auth_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET is_active = false
             WHERE external_auth_id = $1 AND is_active = true",
        )
        .bind(external_auth_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
