//! Handlers for admin-only service views.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use linkdock_core::error::CoreError;
use linkdock_core::types::DbId;
use linkdock_db::repositories::{StatsRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/stats
///
/// Service-wide totals. Admin only.
pub async fn service_stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let stats = StatsRepo::admin_stats(&state.pool).await?;

    Ok(Json(DataResponse { data: stats }))
}

/// GET /api/v1/admin/users
///
/// Per-user usage listing. Admin only.
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let users = StatsRepo::users_with_stats(&state.pool).await?;

    Ok(Json(DataResponse { data: users }))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Remove an account; the account's groups and websites go with it by
/// cascade. Admin only.
pub async fn delete_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = UserRepo::delete(&state.pool, user_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }));
    }

    tracing::info!(user_id, admin_id = admin.user_id, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}
