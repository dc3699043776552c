//! Route definitions for sign-in and admin password management.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /google            -> google_login (public)
/// POST /verify            -> verify_admin_password (public)
/// POST /change-password   -> change_admin_password (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/google", post(auth::google_login))
        .route("/verify", post(auth::verify_admin_password))
        .route("/change-password", post(auth::change_admin_password))
}
