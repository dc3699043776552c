//! Route definitions for bookmark groups and dataset import/export.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::groups;
use crate::state::AppState;

/// Routes mounted at `/groups`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create
/// PUT    /{id}      -> update
/// DELETE /{id}      -> delete
/// GET    /export    -> export_data
/// POST   /import    -> import_data
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(groups::list).post(groups::create))
        // Static segments before the `{id}` capture.
        .route("/export", get(groups::export_data))
        .route("/import", post(groups::import_data))
        .route("/{id}", axum::routing::put(groups::update).delete(groups::delete))
}
