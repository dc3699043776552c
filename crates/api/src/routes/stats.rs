//! Route definitions for per-user dashboard statistics.

use axum::routing::get;
use axum::Router;

use crate::handlers::stats;
use crate::state::AppState;

/// Routes mounted at `/stats`.
///
/// ```text
/// GET / -> user_stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(stats::user_stats))
}
