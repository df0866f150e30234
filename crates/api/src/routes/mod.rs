pub mod admin;
pub mod analytics;
pub mod auth;
pub mod health;
pub mod organizations;
pub mod summaries;
pub mod taxonomy;
pub mod time_entries;
pub mod webhooks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/callback                         OAuth callback (public, redirects)
/// /auth/session                          code exchange -> token pair (public)
/// /auth/refresh                          rotate refresh token (public)
/// /auth/logout                           revoke sessions (requires auth)
/// /auth/bootstrap                        dashboard bootstrap (requires auth)
/// /auth/onboarding                       self-serve onboarding (requires auth)
///
/// /webhooks/identity                     identity events (Svix-signed)
///
/// /admin/invitations                     list, create (admin only)
/// /admin/invitations/{id}                revoke (DELETE, admin only)
///
/// /organizations                         list, create (admin only)
/// /organizations/{id}/members            list members
/// /organizations/{id}/members/{user_id}  deactivate member (admin only)
///
/// /areas                                 list, create
/// /areas/{id}                            update, deactivate
/// /areas/{id}/fields                     list, create
/// /fields/{id}                           update, deactivate
/// /fields/{id}/activities                list, create
/// /activities/{id}                       update, deactivate
///
/// /time-entries                          list (?from=&to=), create
/// /time-entries/{id}                     windowed edit (PUT)
///
/// /analytics/summary                     per-area totals (?from=&to=)
///
/// /summaries                             generate AI summary (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication and sign-in triggers.
        .nest("/auth", auth::router())
        // Identity-provider event mirror.
        .nest("/webhooks", webhooks::router())
        // Admin invitation management.
        .nest("/admin/invitations", admin::router())
        // Organizations and membership.
        .nest("/organizations", organizations::router())
        // Taxonomy: areas, fields, activities.
        .merge(taxonomy::router())
        // Time-entry logging and editing.
        .nest("/time-entries", time_entries::router())
        // Analytics aggregates.
        .nest("/analytics", analytics::router())
        // AI summaries.
        .nest("/summaries", summaries::router())
}
