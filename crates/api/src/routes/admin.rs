//! Route definitions for admin-only service views.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin` (every route requires an admin session).
///
/// ```text
/// GET    /stats      -> service_stats
/// GET    /users      -> list_users
/// DELETE /users/{id} -> delete_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(admin::service_stats))
        .route("/users", get(admin::list_users))
        .route("/users/{id}", delete(admin::delete_user))
}
