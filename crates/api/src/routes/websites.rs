//! Route definitions for bookmarks, link checking and metadata extraction.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{check, websites};
use crate::state::AppState;

/// Routes mounted at `/websites`.
///
/// ```text
/// GET    /               -> list
/// POST   /               -> create
/// GET    /{id}           -> get_by_id
/// PUT    /{id}           -> update
/// DELETE /{id}           -> delete
/// POST   /{id}/click     -> record_click
/// GET    /check          -> check_batch (?batch=N)
/// DELETE /check          -> bulk_delete
/// POST   /analyze        -> analyze
/// POST   /fetch-logo     -> fetch_logo
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(websites::list).post(websites::create))
        // Static segments before the `{id}` capture.
        .route(
            "/check",
            get(check::check_batch).delete(check::bulk_delete),
        )
        .route("/analyze", post(websites::analyze))
        .route("/fetch-logo", post(websites::fetch_logo))
        .route(
            "/{id}",
            get(websites::get_by_id)
                .put(websites::update)
                .delete(websites::delete),
        )
        .route("/{id}/click", post(websites::record_click))
}
