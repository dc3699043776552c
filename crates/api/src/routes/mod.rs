pub mod admin;
pub mod auth;
pub mod groups;
pub mod health;
pub mod stats;
pub mod websites;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/google                       Google sign-in (public)
/// /auth/verify                       admin password verification
/// /auth/change-password              rotate the admin password (admin only)
///
/// /groups                            list, create
/// /groups/{id}                       update, delete
/// /groups/export                     export the user's full dataset (GET)
/// /groups/import                     import a dataset (POST)
///
/// /websites                          list, create
/// /websites/{id}                     get, update, delete
/// /websites/{id}/click               record a visit (POST)
/// /websites/check                    probe one batch (GET), delete bad links (DELETE)
/// /websites/analyze                  extract page metadata (POST)
/// /websites/fetch-logo               resolve a page icon (POST)
///
/// /stats                             per-user dashboard stats (GET)
///
/// /admin/stats                       service-wide totals (admin only)
/// /admin/users                       per-user usage listing (admin only)
/// /admin/users/{id}                  delete an account (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/groups", groups::router())
        .nest("/websites", websites::router())
        .nest("/stats", stats::router())
        .nest("/admin", admin::router())
}
