//! Route definitions for analytics.

use axum::routing::get;
use axum::Router;

use crate::handlers::analytics;
use crate::state::AppState;

/// Routes mounted at `/analytics`.
///
/// ```text
/// GET /summary  -> summary (?from=&to=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/summary", get(analytics::summary))
}
