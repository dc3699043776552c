//! Handlers for the batched link-health prober.
//!
//! The check endpoint is stateless: each request addresses one slice of the
//! caller's link list by batch index, probes it, and reports the slice plus
//! enough bookkeeping (`total`, `isLastBatch`, `progress`) for the client to
//! drive the run. Cancelling a run is therefore purely client-side; the
//! server never holds run state.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use linkdock_checker::BatchPlan;
use linkdock_core::check::{BatchReport, BATCH_SIZE};
use linkdock_core::types::DbId;
use linkdock_db::repositories::WebsiteRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CheckParams {
    /// Zero-based batch index; defaults to the first batch.
    pub batch: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct BulkDeleteRequest {
    pub ids: Vec<DbId>,
}

#[derive(Debug, Serialize)]
pub struct BulkDeleteResponse {
    /// Rows actually removed; ids not owned by the caller do not count.
    pub deleted: u64,
}

/// GET /api/v1/websites/check?batch=N
///
/// Probe one batch of the caller's links. An index past the end of the list
/// returns an empty last batch rather than an error, so a client whose list
/// shrank mid-run terminates cleanly.
pub async fn check_batch(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<CheckParams>,
) -> AppResult<impl IntoResponse> {
    let batch_index = params.batch.unwrap_or(0);

    let items = WebsiteRepo::list_link_items(&state.pool, auth.user_id).await?;
    let plan = BatchPlan::new(items.len(), batch_index, BATCH_SIZE);

    let results = state.prober.probe_batch(&items[plan.start..plan.end]).await;

    tracing::debug!(
        user_id = auth.user_id,
        batch_index,
        probed = results.len(),
        total = plan.total,
        "Link batch probed"
    );

    Ok(Json(DataResponse {
        data: BatchReport {
            total: plan.total,
            batch_index: plan.batch_index,
            batch_size: plan.batch_size,
            is_last_batch: plan.is_last_batch,
            results,
            progress: plan.progress(),
        },
    }))
}

/// DELETE /api/v1/websites/check
///
/// Remove a set of the caller's links in one statement. An empty id list is
/// a client error; ids owned by someone else are silently skipped.
pub async fn bulk_delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<BulkDeleteRequest>,
) -> AppResult<impl IntoResponse> {
    if input.ids.is_empty() {
        return Err(AppError::BadRequest("ids must not be empty".into()));
    }

    let deleted = WebsiteRepo::bulk_delete(&state.pool, auth.user_id, &input.ids).await?;

    tracing::info!(
        user_id = auth.user_id,
        requested = input.ids.len(),
        deleted,
        "Bulk delete finished"
    );

    Ok(Json(DataResponse {
        data: BulkDeleteResponse { deleted },
    }))
}
