//! Route definitions for inbound webhooks.

use axum::routing::post;
use axum::Router;

use crate::handlers::webhooks;
use crate::state::AppState;

/// Routes mounted at `/webhooks`.
///
/// ```text
/// POST /identity  -> identity_webhook (Svix-signed, no session auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/identity", post(webhooks::identity_webhook))
}
