//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// GET  /callback   -> callback (public, 303 redirect)
/// POST /session    -> create_session (public)
/// POST /refresh    -> refresh (public)
/// POST /logout     -> logout (requires auth)
/// POST /bootstrap  -> bootstrap (requires auth)
/// POST /onboarding -> complete_onboarding (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/callback", get(auth::callback))
        .route("/session", post(auth::create_session))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
        .route("/bootstrap", post(auth::bootstrap))
        .route("/onboarding", post(auth::complete_onboarding))
}
