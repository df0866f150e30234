//! Route definitions for AI summaries.

use axum::routing::post;
use axum::Router;

use crate::handlers::summaries;
use crate::state::AppState;

/// Routes mounted at `/summaries`.
///
/// ```text
/// POST /  -> generate_summary
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(summaries::generate_summary))
}
