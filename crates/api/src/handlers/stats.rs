//! Handlers for per-user dashboard statistics.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use linkdock_db::repositories::StatsRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/stats
///
/// Totals for the caller's dashboard: group and website counts, click
/// volume, and clicks within the trailing week.
pub async fn user_stats(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let stats = StatsRepo::user_stats(&state.pool, auth.user_id).await?;

    Ok(Json(DataResponse { data: stats }))
}
