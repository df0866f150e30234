//! Route definitions for time entries.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::time_entries;
use crate::state::AppState;

/// Routes mounted at `/time-entries`.
///
/// ```text
/// GET  /      -> list_entries (?from=&to=)
/// POST /      -> create_entry
/// PUT  /{id}  -> update_entry (inside edit window only; no delete)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(time_entries::list_entries).post(time_entries::create_entry),
        )
        .route("/{id}", put(time_entries::update_entry))
}
