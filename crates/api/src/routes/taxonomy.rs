//! Route definitions for the taxonomy (areas, fields, activities).

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::taxonomy;
use crate::state::AppState;

/// Taxonomy routes, merged at the API root.
///
/// ```text
/// GET    /areas                   -> list_areas
/// POST   /areas                   -> create_area
/// PUT    /areas/{id}              -> update_area
/// DELETE /areas/{id}              -> deactivate_area
/// GET    /areas/{id}/fields       -> list_fields
/// POST   /areas/{id}/fields       -> create_field
/// PUT    /fields/{id}             -> update_field
/// DELETE /fields/{id}             -> deactivate_field
/// GET    /fields/{id}/activities  -> list_activities
/// POST   /fields/{id}/activities  -> create_activity
/// PUT    /activities/{id}         -> update_activity
/// DELETE /activities/{id}         -> deactivate_activity
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/areas",
            get(taxonomy::list_areas).post(taxonomy::create_area),
        )
        .route(
            "/areas/{id}",
            put(taxonomy::update_area).delete(taxonomy::deactivate_area),
        )
        .route(
            "/areas/{id}/fields",
            get(taxonomy::list_fields).post(taxonomy::create_field),
        )
        .route(
            "/fields/{id}",
            put(taxonomy::update_field).delete(taxonomy::deactivate_field),
        )
        .route(
            "/fields/{id}/activities",
            get(taxonomy::list_activities).post(taxonomy::create_activity),
        )
        .route(
            "/activities/{id}",
            put(taxonomy::update_activity).delete(taxonomy::deactivate_activity),
        )
}
