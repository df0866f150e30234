//! Route definitions for organizations and their membership.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::{members, organizations};
use crate::state::AppState;

/// Routes mounted at `/organizations`.
///
/// ```text
/// GET    /                        -> list_organizations (admin only)
/// POST   /                        -> create_organization (admin only)
/// GET    /{id}/members            -> list_members
/// DELETE /{id}/members/{user_id}  -> deactivate_member (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(organizations::list_organizations).post(organizations::create_organization),
        )
        .route("/{id}/members", get(members::list_members))
        .route(
            "/{id}/members/{user_id}",
            delete(members::deactivate_member),
        )
}
